//! Best-effort username extraction from HTML exports.
//!
//! The HTML pages have no stable structure, so matching is done by
//! [`UsernameRules`] heuristics. Swapping the rules does not affect callers.

use super::ExtractError;
use crate::models::UsernameSet;
use scraper::{Html, Selector};
use tracing::debug;

/// Heuristics that decide which links and headings name an account.
pub trait UsernameRules {
    /// Username for an anchor with the given `href` and visible text.
    fn link_username(&self, href: &str, text: &str) -> Option<String>;

    /// Username for a heading element's text.
    fn heading_username(&self, text: &str) -> Option<String>;
}

/// Rules matching Instagram profile links and `<h2>` account headings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileLinkRules;

const USER_PATH_MARKER: &str = "_u/";
const PROFILE_URL_MARKER: &str = "instagram.com/";

impl UsernameRules for ProfileLinkRules {
    fn link_username(&self, href: &str, text: &str) -> Option<String> {
        if let Some(idx) = href.rfind(USER_PATH_MARKER) {
            let username = &href[idx + USER_PATH_MARKER.len()..];
            return (!username.is_empty()).then(|| username.to_string());
        }

        if href.contains(PROFILE_URL_MARKER) {
            return plain_text_username(text);
        }

        None
    }

    fn heading_username(&self, text: &str) -> Option<String> {
        plain_text_username(text)
    }
}

/// Trimmed text, unless it is empty or looks like a URL.
fn plain_text_username(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.starts_with("http") {
        None
    } else {
        Some(text.to_string())
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(e.to_string()))
}

/// Collect usernames from a parsed document using the given rules.
pub fn extract_usernames(doc: &Html, rules: &impl UsernameRules) -> Result<UsernameSet, ExtractError> {
    let links = selector("a[href]")?;
    let headings = selector("h2")?;

    let mut usernames = UsernameSet::new();

    for link in doc.select(&links) {
        let href = link.value().attr("href").unwrap_or_default();
        let text: String = link.text().collect();
        match rules.link_username(href, &text) {
            Some(username) => {
                usernames.insert(username);
            }
            None => debug!("Skipping link: {}", href),
        }
    }

    for heading in doc.select(&headings) {
        let text: String = heading.text().collect();
        if let Some(username) = rules.heading_username(&text) {
            usernames.insert(username);
        }
    }

    Ok(usernames)
}

/// Parse raw HTML and collect usernames.
pub fn parse_usernames(content: &str, rules: &impl UsernameRules) -> Result<UsernameSet, ExtractError> {
    let doc = Html::parse_document(content);
    extract_usernames(&doc, rules)
}
