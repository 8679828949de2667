//! Followback - Instagram follower analysis
//!
//! A CLI tool that reads an Instagram data export (HTML or JSON), finds the
//! accounts you follow that don't follow you back, applies a persistent
//! ignore list and writes the result to CSV or JSON. Optionally scores
//! followers by their likes on your posts and stories.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing export file, unreadable input, write failure)

mod analysis;
mod cli;
mod config;
mod extractor;
mod ignore_list;
mod models;
mod report;

use analysis::engagement::{self, EngagementInputs, LikesHistory};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, EngagementConfig, DEFAULT_CONFIG_FILE};
use models::{ExportEntry, UsernameSet};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("Followback v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Analysis failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .followback.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to change export paths, output format and engagement scoring.");
    Ok(())
}

/// Initialize logging based on verbosity settings. `RUST_LOG` takes precedence.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Run the complete analysis.
fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);
    config.validate()?;

    let input = &config.input;
    require_file(&input.following, "following")?;
    require_file(&input.followers, "followers")?;

    let following = extractor::extract_usernames(&input.following)
        .context("Failed to extract following list")?;
    let follower_entries = extractor::extract_entries(&input.followers)
        .context("Failed to extract followers list")?;
    let followers: UsernameSet = follower_entries.iter().map(|e| e.username.clone()).collect();

    info!(
        "Loaded {} following from {} and {} followers from {}",
        following.len(),
        input.following.display(),
        followers.len(),
        input.followers.display()
    );

    let removed = if input.cleanup_ignore_list {
        ignore_list::cleanup(&following, &input.ignore_list).with_context(|| {
            format!("Failed to update ignore list: {}", input.ignore_list.display())
        })?
    } else {
        UsernameSet::new()
    };

    let ignored = ignore_list::load(&input.ignore_list).with_context(|| {
        format!("Failed to read ignore list: {}", input.ignore_list.display())
    })?;
    let result = analysis::analyze(&following, &followers, &ignored);

    print!("{}", report::render_summary(&result, !ignored.is_empty()));
    if !removed.is_empty() {
        print!("{}", report::render_removed(&removed));
    }

    report::write_report(&result, &config.output.path, config.output.format)?;
    println!(
        "\n{}\nResults saved to: {}",
        "=".repeat(50),
        config.output.path.display()
    );

    if config.engagement.enabled {
        run_engagement(&config.engagement, &followers, &follower_entries)?;
    }

    Ok(())
}

/// Score followers from likes history, print the top entries and save all scores.
fn run_engagement(
    settings: &EngagementConfig,
    followers: &UsernameSet,
    follower_entries: &[ExportEntry],
) -> Result<()> {
    let posts = LikesHistory::load(&settings.post_likes)?;
    let stories = LikesHistory::load(&settings.story_likes)?;

    if posts.content_count() + stories.content_count() == 0 {
        warn!(
            "No likes history found at {} or {}; all scores will be zero",
            settings.post_likes.display(),
            settings.story_likes.display()
        );
    }

    let follow_times = extractor::follow_times(follower_entries);
    let records = engagement::score_followers(
        followers,
        &EngagementInputs {
            posts: &posts,
            stories: &stories,
            follow_times: &follow_times,
            now: Utc::now().timestamp(),
        },
    );

    print!("{}", report::render_engagement(&records, settings.top));
    report::write_engagement_report(&records, &settings.output)?;
    println!("Engagement scores saved to: {}", settings.output.display());

    Ok(())
}

/// Basic existence check for a required export file.
fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        bail!("{} export not found: {}", what, path.display());
    }
    Ok(())
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` must parse; a broken default file only warns.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
