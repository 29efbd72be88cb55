//! Input validation for user-supplied text.
//!
//! All functions here are pure: they never touch the store and give the same
//! answer for the same input. Lengths are counted in characters after
//! trimming surrounding whitespace.
//!
//! # Example
//!
//! ```
//! use tasker::validation::{parse_positive_int, parse_yes_no, validate_title};
//!
//! assert!(validate_title("  Buy milk  "));
//! assert_eq!(parse_positive_int(" 12 "), Some(12));
//! assert_eq!(parse_yes_no("Да"), Some(true));
//! ```

/// Maximum title length, in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum description length, in characters, after trimming.
pub const MAX_DESCRIPTION_LEN: usize = 500;

const YES_TOKENS: &[&str] = &["да", "yes", "1", "true", "y"];
const NO_TOKENS: &[&str] = &["нет", "no", "0", "false", "n"];

/// Returns true if the trimmed title is between 1 and [`MAX_TITLE_LEN`]
/// characters long.
#[must_use]
pub fn validate_title(text: &str) -> bool {
    let len = text.trim().chars().count();
    (1..=MAX_TITLE_LEN).contains(&len)
}

/// Trims a description and returns it if it fits in [`MAX_DESCRIPTION_LEN`]
/// characters.
///
/// `None` means the description is too long; an empty description is valid.
#[must_use]
pub fn validate_description(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (trimmed.chars().count() <= MAX_DESCRIPTION_LEN).then(|| trimmed.to_string())
}

/// Parses a strictly positive integer, ignoring surrounding whitespace.
#[must_use]
pub fn parse_positive_int(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Parses a yes/no answer in English or Russian.
///
/// Recognised tokens (case-insensitive): `да`, `yes`, `1`, `true`, `y` for
/// yes and `нет`, `no`, `0`, `false`, `n` for no.
#[must_use]
pub fn parse_yes_no(text: &str) -> Option<bool> {
    let token = text.trim().to_lowercase();
    if YES_TOKENS.contains(&token.as_str()) {
        Some(true)
    } else if NO_TOKENS.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}
