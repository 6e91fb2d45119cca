//! Numeric extraction from scraped text.

use std::sync::LazyLock;

use regex::Regex;

use super::FetchError;

/// A run of at least two digits, optionally grouped with commas.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d*,?\d*,?\d*,?\d+,?\d+").expect("number pattern is valid")
});

/// Find the first number in `text`, thousands separators removed.
pub fn find_number(text: &str) -> Option<String> {
    NUMBER_PATTERN
        .find(text)
        .map(|m| m.as_str().replace(',', ""))
}

/// Like [`find_number`], but a missing number is an error.
pub fn extract_number(text: &str) -> Result<String, FetchError> {
    find_number(text).ok_or_else(|| FetchError::ParseMismatch {
        what: "number".to_string(),
        text: text.to_string(),
    })
}
