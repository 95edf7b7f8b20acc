//! Field validation for contact and note values.
//!
//! Every value that enters a record goes through one of the parsers here, so a
//! record never holds a malformed phone, email, birthday or tag.
//!
//! Valid tags:
//! - Alphanumeric characters, underscores (`_`), and hyphens (`-`)
//! - Must start with a letter
//! - Cannot have consecutive hyphens (`--`)
//! - Cannot end with a hyphen

use crate::error::{Result, RoloError};
use chrono::NaiveDate;

pub const PHONE_DIGITS: usize = 10;

/// Validates a tag name.
///
/// # Examples
/// ```
/// use rolo::validation::validate_tag_name;
///
/// assert!(validate_tag_name("work").is_ok());
/// assert!(validate_tag_name("f7-bar8").is_ok());
///
/// assert!(validate_tag_name("").is_err());
/// assert!(validate_tag_name("-foo").is_err());
/// assert!(validate_tag_name("foo--bar").is_err());
/// ```
pub fn validate_tag_name(name: &str) -> std::result::Result<(), TagValidationError> {
    let mut chars = name.chars();
    let first_char = chars.next().ok_or(TagValidationError::Empty)?;
    if !first_char.is_ascii_alphabetic() {
        return Err(TagValidationError::InvalidStart(first_char));
    }

    if name.ends_with('-') {
        return Err(TagValidationError::EndsWithHyphen);
    }

    let mut prev_was_hyphen = false;
    for ch in name.chars() {
        if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '-') {
            return Err(TagValidationError::InvalidCharacter(ch));
        }
        if ch == '-' && prev_was_hyphen {
            return Err(TagValidationError::ConsecutiveHyphens);
        }
        prev_was_hyphen = ch == '-';
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    Empty,
    InvalidStart(char),
    EndsWithHyphen,
    ConsecutiveHyphens,
    InvalidCharacter(char),
}

impl std::fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValidationError::Empty => write!(f, "tag name cannot be empty"),
            TagValidationError::InvalidStart(ch) => {
                write!(f, "tag name must start with a letter, found '{}'", ch)
            }
            TagValidationError::EndsWithHyphen => write!(f, "tag name cannot end with a hyphen"),
            TagValidationError::ConsecutiveHyphens => {
                write!(f, "tag name cannot contain consecutive hyphens")
            }
            TagValidationError::InvalidCharacter(ch) => write!(
                f,
                "tag name contains invalid character '{}' (only alphanumeric, underscore, and hyphen allowed)",
                ch
            ),
        }
    }
}

impl std::error::Error for TagValidationError {}

/// Validates every tag, returning them owned. Fails on the first bad one.
pub fn parse_tags<I, T>(tags: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| {
            let tag = tag.as_ref();
            validate_tag_name(tag)
                .map(|_| tag.to_string())
                .map_err(|e| RoloError::InvalidValue(format!("'{}': {}", tag, e)))
        })
        .collect()
}

/// Normalizes a phone number to its bare digits.
///
/// Spaces, dashes and parentheses are accepted as separators; what remains
/// must be exactly ten digits.
pub fn parse_phone(raw: &str) -> Result<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if digits.len() != PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RoloError::InvalidValue(format!(
            "phone '{}' must contain exactly {} digits",
            raw, PHONE_DIGITS
        )));
    }
    Ok(digits)
}

pub fn parse_email(raw: &str) -> Result<String> {
    let invalid = || RoloError::InvalidValue(format!("'{}' is not a valid email address", raw));

    let (local, domain) = raw.split_once('@').ok_or_else(invalid)?;
    let domain_ok = !domain.contains('@')
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if local.is_empty() || !domain_ok || raw.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(raw.to_string())
}

/// Parses a birthday given as `DD.MM.YYYY` or ISO `YYYY-MM-DD`.
pub fn parse_birthday(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| {
            RoloError::InvalidValue(format!(
                "birthday '{}' must be a date like DD.MM.YYYY or YYYY-MM-DD",
                raw
            ))
        })
}
