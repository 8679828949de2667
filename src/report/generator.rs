//! Console summary and file report generation.

use crate::models::{EngagementRecord, FollowAnalysis, OutputFormat, UsernameSet};
use anyhow::{Context, Result};
use std::io;
use std::path::Path;

const RULE_WIDTH: usize = 50;

const ENGAGEMENT_COLUMNS: [&str; 9] = [
    "username",
    "post_likes",
    "story_likes",
    "total_likes",
    "followed_since",
    "likes_per_content",
    "days_since_followed",
    "likes_per_day",
    "score",
];

/// Generate the console summary: counts, then the sorted account list.
///
/// Ignore-list lines are only shown when the ignore list has entries.
pub fn render_summary(analysis: &FollowAnalysis, ignore_list_active: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", rule));
    output.push_str("INSTAGRAM FOLLOWER ANALYSIS\n");
    output.push_str(&format!("{}\n\n", rule));

    output.push_str(&format!("You follow: {} accounts\n", analysis.following_count));
    output.push_str(&format!("Follow you: {} accounts\n", analysis.followers_count));
    output.push_str(&format!("Mutual following: {} accounts\n", analysis.mutual.len()));
    output.push_str(&format!(
        "Don't follow you back: {} accounts\n",
        analysis.not_following_back.len()
    ));

    if ignore_list_active {
        output.push_str(&format!("Ignored: {} accounts\n", analysis.ignored_count));
        output.push_str(&format!("Remaining: {} accounts\n", analysis.filtered.len()));
    }

    output.push('\n');

    if analysis.not_following_back.is_empty() {
        output.push_str("Everyone you follow follows you back. 🎉\n");
        return output;
    }

    if analysis.filtered.is_empty() {
        output.push_str("Every account left is on your ignore list.\n");
        return output;
    }

    for username in &analysis.filtered {
        output.push_str(&format!("  • {}\n", username));
    }

    output
}

/// Generate the list of ignore-list entries removed by cleanup.
pub fn render_removed(removed: &UsernameSet) -> String {
    let mut output = format!(
        "\n🧹 Removed {} accounts you no longer follow from the ignore list:\n",
        removed.len()
    );
    for username in removed {
        output.push_str(&format!("  - {}\n", username));
    }
    output
}

/// Generate the top `n` engagement records as a table.
pub fn render_engagement(records: &[EngagementRecord], n: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nTop {} most engaged followers:\n", n.min(records.len())));
    output.push_str(&format!(
        "  {:<24} {:>6} {:>6} {:>8} {:>8}\n",
        "username", "posts", "story", "per day", "score"
    ));

    for record in records.iter().take(n) {
        output.push_str(&format!(
            "  {:<24} {:>6} {:>6} {:>8.3} {:>8.2}\n",
            record.username, record.post_likes, record.story_likes, record.likes_per_day, record.score
        ));
    }

    output
}

/// Write the filtered usernames as CSV with a `username` header.
pub fn write_csv<W: io::Write>(usernames: &UsernameSet, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["username"])?;
    for username in usernames {
        wtr.write_record([username])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write engagement records as CSV, one row per follower.
///
/// The header row is written even when there are no records.
pub fn write_engagement_csv<W: io::Write>(records: &[EngagementRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(ENGAGEMENT_COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Generate a JSON report.
pub fn generate_json_report(analysis: &FollowAnalysis) -> Result<String> {
    serde_json::to_string_pretty(analysis).map_err(Into::into)
}

/// Write the not-following-back report to `path` in the given format.
pub fn write_report(analysis: &FollowAnalysis, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&analysis.filtered, file)
        }
        OutputFormat::Json => {
            let content = generate_json_report(analysis)?;
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write report to {}", path.display()))
        }
    }
}

/// Write the engagement CSV to `path`.
pub fn write_engagement_report(records: &[EngagementRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_engagement_csv(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set(names: &[&str]) -> UsernameSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_analysis() -> FollowAnalysis {
        FollowAnalysis {
            following_count: 4,
            followers_count: 3,
            mutual: set(&["bob", "carol"]),
            not_following_back: set(&["alice", "dave"]),
            filtered: set(&["dave"]),
            ignored_count: 1,
        }
    }

    fn record(username: &str, score: f64) -> EngagementRecord {
        EngagementRecord {
            username: username.to_string(),
            post_likes: 2,
            story_likes: 1,
            total_likes: 3,
            followed_since: None,
            likes_per_content: 0.5,
            days_since_followed: 1.0,
            likes_per_day: 3.0,
            score,
        }
    }

    #[test]
    fn test_render_summary_with_ignore_list() {
        let summary = render_summary(&create_test_analysis(), true);

        assert!(summary.contains("You follow: 4 accounts"));
        assert!(summary.contains("Follow you: 3 accounts"));
        assert!(summary.contains("Mutual following: 2 accounts"));
        assert!(summary.contains("Don't follow you back: 2 accounts"));
        assert!(summary.contains("Ignored: 1 accounts"));
        assert!(summary.contains("Remaining: 1 accounts"));
        assert!(summary.contains("  • dave"));
        assert!(!summary.contains("alice"));
    }

    #[test]
    fn test_render_summary_without_ignore_list() {
        let summary = render_summary(&create_test_analysis(), false);
        assert!(!summary.contains("Ignored:"));
        assert!(!summary.contains("Remaining:"));
    }

    #[test]
    fn test_render_summary_lists_sorted() {
        let mut analysis = create_test_analysis();
        analysis.filtered = set(&["zed", "amy", "Mo"]);

        let summary = render_summary(&analysis, false);
        let mo = summary.find("• Mo").unwrap();
        let amy = summary.find("• amy").unwrap();
        let zed = summary.find("• zed").unwrap();
        assert!(mo < amy && amy < zed);
    }

    #[test]
    fn test_render_summary_empty_result() {
        let mut analysis = create_test_analysis();
        analysis.filtered.clear();
        assert!(render_summary(&analysis, true).contains("on your ignore list"));

        analysis.not_following_back.clear();
        assert!(render_summary(&analysis, true).contains("follows you back"));
    }

    #[test]
    fn test_render_removed() {
        let text = render_removed(&set(&["old1", "old2"]));
        assert!(text.contains("Removed 2 accounts"));
        assert!(text.contains("  - old1\n  - old2\n"));
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&set(&["b", "a", "with,comma"]), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "username\na\nb\n\"with,comma\"\n");
    }

    #[test]
    fn test_write_csv_empty_has_header() {
        let mut buf = Vec::new();
        write_csv(&UsernameSet::new(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "username\n");
    }

    #[test]
    fn test_write_engagement_csv() {
        let mut buf = Vec::new();
        write_engagement_csv(&[record("bob", 4.2)], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("username,post_likes,story_likes,total_likes,followed_since,likes_per_content,days_since_followed,likes_per_day,score")
        );
        assert!(lines.next().unwrap().starts_with("bob,2,1,3,,0.5,"));
    }

    #[test]
    fn test_write_engagement_csv_empty_has_header() {
        let mut buf = Vec::new();
        write_engagement_csv(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            format!("{}\n", ENGAGEMENT_COLUMNS.join(","))
        );
    }

    #[test]
    fn test_render_engagement_limits_rows() {
        let records = vec![record("a", 3.0), record("b", 2.0), record("c", 1.0)];
        let text = render_engagement(&records, 2);

        assert!(text.contains("Top 2 most engaged"));
        assert!(text.contains("a "));
        assert!(!text.contains("\n  c "));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_analysis()).unwrap();
        assert!(json.contains("\"not_following_back\""));
        assert!(json.contains("\"filtered\""));
        assert!(json.contains("\"ignored_count\": 1"));
    }

    #[test]
    fn test_write_report_formats() {
        let dir = TempDir::new().unwrap();
        let analysis = create_test_analysis();

        let csv_path = dir.path().join("out.csv");
        write_report(&analysis, &csv_path, OutputFormat::Csv).unwrap();
        assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), "username\ndave\n");

        let json_path = dir.path().join("out.json");
        write_report(&analysis, &json_path, OutputFormat::Json).unwrap();
        let parsed: FollowAnalysis =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed, analysis);
    }
}
