//! Keyword tagging of issue text.

use std::collections::BTreeSet;

/// Vocabulary matched as case-insensitive substrings of the title and body.
pub const KEYWORDS: [&str; 15] = [
    "bug",
    "feature",
    "enhancement",
    "ui",
    "api",
    "error",
    "crash",
    "performance",
    "security",
    "documentation",
    "test",
    "cli",
    "gui",
    "config",
    "extension",
];

/// Vocabulary hits in `text` plus every label name, deduplicated.
///
/// Substring matching is deliberate: "build" yields "ui", "testing" yields "test".
pub fn extract_keywords<'a>(
    text: &str,
    labels: impl IntoIterator<Item = &'a str>,
) -> BTreeSet<String> {
    let text = text.to_lowercase();
    KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .chain(labels.into_iter().map(str::to_string))
        .collect()
}

/// Title and body joined the way they are scanned.
pub fn issue_text(title: &str, body: &str) -> String {
    format!("{title} {body}")
}
