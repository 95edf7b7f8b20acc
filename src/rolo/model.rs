use crate::error::{Result, RoloError};
use crate::validation::{parse_email, parse_phone, parse_tags};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use uuid::Uuid;

/// The editable, multi-valued parts of a contact, addressed by name from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Phone,
    Email,
    Address,
    Tag,
}

impl Field {
    pub const NAMES: [&'static str; 4] = ["phone", "email", "address", "tag"];
}

impl FromStr for Field {
    type Err = RoloError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "phone" | "phones" => Ok(Field::Phone),
            "email" | "emails" => Ok(Field::Email),
            "address" => Ok(Field::Address),
            "tag" | "tags" => Ok(Field::Tag),
            _ => Err(RoloError::NotFound(format!(
                "Unknown field '{}' (expected one of: {})",
                s,
                Field::NAMES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::Tag => "tag",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl Contact {
    pub fn new(name: String, tags: BTreeSet<String>) -> Self {
        Self {
            name,
            tags,
            phones: Vec::new(),
            emails: Vec::new(),
            address: None,
            birthday: None,
        }
    }

    /// Adds a value to a field. Returns `false` when the value was already present.
    ///
    /// For `Address`, which holds a single value, the new value replaces the old one.
    pub fn add_value(&mut self, field: Field, value: &str) -> Result<bool> {
        match field {
            Field::Phone => Ok(push_unique(&mut self.phones, parse_phone(value)?)),
            Field::Email => Ok(push_unique(&mut self.emails, parse_email(value)?)),
            Field::Tag => {
                let tag = single_tag(value)?;
                Ok(self.tags.insert(tag))
            }
            Field::Address => {
                let address = parse_address(value)?;
                let changed = self.address.as_deref() != Some(address.as_str());
                self.address = Some(address);
                Ok(changed)
            }
        }
    }

    /// Replaces the occurrence equal to `old` with `new`.
    ///
    /// `new` is validated before anything changes, so a failed edit leaves the
    /// contact untouched.
    pub fn replace_value(&mut self, field: Field, old: &str, new: &str) -> Result<()> {
        match field {
            Field::Phone => {
                let new = parse_phone(new)?;
                let slot = find_slot(&self.phones, &normalize_phone(old))
                    .ok_or_else(|| self.missing_value(field, old))?;
                self.check_not_duplicate(field, &self.phones, slot, &new)?;
                self.phones[slot] = new;
            }
            Field::Email => {
                let new = parse_email(new)?;
                let slot =
                    find_slot(&self.emails, old).ok_or_else(|| self.missing_value(field, old))?;
                self.check_not_duplicate(field, &self.emails, slot, &new)?;
                self.emails[slot] = new;
            }
            Field::Tag => {
                let new = single_tag(new)?;
                if !self.tags.remove(old) {
                    return Err(self.missing_value(field, old));
                }
                self.tags.insert(new);
            }
            Field::Address => {
                let new = parse_address(new)?;
                if self.address.as_deref() != Some(old) {
                    return Err(self.missing_value(field, old));
                }
                self.address = Some(new);
            }
        }
        Ok(())
    }

    pub fn remove_value(&mut self, field: Field, value: &str) -> Result<()> {
        let removed = match field {
            Field::Phone => remove_first(&mut self.phones, &normalize_phone(value)),
            Field::Email => remove_first(&mut self.emails, value),
            Field::Tag => self.tags.remove(value),
            Field::Address => {
                if self.address.as_deref() == Some(value) {
                    self.address = None;
                    true
                } else {
                    false
                }
            }
        };

        if removed {
            Ok(())
        } else {
            Err(self.missing_value(field, value))
        }
    }

    /// Case-insensitive substring match against the name and the tags.
    /// `query` must already be lowercase.
    pub(crate) fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(query))
    }

    // Replacing a value with itself is fine; with another existing value is not.
    fn check_not_duplicate(&self, field: Field, values: &[String], slot: usize, new: &str) -> Result<()> {
        match find_slot(values, new) {
            Some(other) if other != slot => Err(RoloError::InvalidValue(format!(
                "Contact '{}' already has {} '{}'",
                self.name, field, new
            ))),
            _ => Ok(()),
        }
    }

    fn missing_value(&self, field: Field, value: &str) -> RoloError {
        RoloError::NotFound(format!(
            "Contact '{}' has no {} '{}'",
            self.name, field, value
        ))
    }
}

fn single_tag(value: &str) -> Result<String> {
    Ok(parse_tags([value])?.remove(0))
}

fn parse_address(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RoloError::InvalidValue("address cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

// Lookups by an old phone accept the same separators as input does.
fn normalize_phone(raw: &str) -> String {
    parse_phone(raw).unwrap_or_else(|_| raw.to_string())
}

fn find_slot(values: &[String], needle: &str) -> Option<usize> {
    values.iter().position(|v| v == needle)
}

fn push_unique(values: &mut Vec<String>, value: String) -> bool {
    if values.contains(&value) {
        return false;
    }
    values.push(value);
    true
}

fn remove_first(values: &mut Vec<String>, needle: &str) -> bool {
    match find_slot(values, needle) {
        Some(slot) => {
            values.remove(slot);
            true
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable surrogate key. Users address notes by position; this never changes.
    pub id: Uuid,
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content,
            tags: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Contact {
        Contact::new("alice".into(), BTreeSet::new())
    }

    #[test]
    fn field_parses_singular_and_plural() {
        assert_eq!("Phone".parse::<Field>().unwrap(), Field::Phone);
        assert_eq!("emails".parse::<Field>().unwrap(), Field::Email);
        assert_eq!("tags".parse::<Field>().unwrap(), Field::Tag);
        let err = "nickname".parse::<Field>().unwrap_err();
        assert!(matches!(err, RoloError::NotFound(_)));
    }

    #[test]
    fn add_value_dedupes_phones() {
        let mut c = alice();
        assert!(c.add_value(Field::Phone, "0501234567").unwrap());
        assert!(!c.add_value(Field::Phone, "050-123-45-67").unwrap());
        assert_eq!(c.phones, vec!["0501234567"]);
    }

    #[test]
    fn replace_phone_only_touches_matching_occurrence() {
        let mut c = alice();
        c.add_value(Field::Phone, "0501111111").unwrap();
        c.add_value(Field::Phone, "0502222222").unwrap();

        c.replace_value(Field::Phone, "050-222-22-22", "0503333333")
            .unwrap();
        assert_eq!(c.phones, vec!["0501111111", "0503333333"]);
    }

    #[test]
    fn replace_with_invalid_value_leaves_contact_untouched() {
        let mut c = alice();
        c.add_value(Field::Phone, "0501111111").unwrap();
        let before = c.clone();

        assert!(matches!(
            c.replace_value(Field::Phone, "0501111111", "123"),
            Err(RoloError::InvalidValue(_))
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn replace_with_existing_value_is_rejected() {
        let mut c = alice();
        c.add_value(Field::Phone, "0501111111").unwrap();
        c.add_value(Field::Phone, "0502222222").unwrap();
        let before = c.clone();

        let err = c
            .replace_value(Field::Phone, "0501111111", "050-222-22-22")
            .unwrap_err();
        assert!(matches!(err, RoloError::InvalidValue(_)));
        assert_eq!(
            err.to_string(),
            "Invalid value: Contact 'alice' already has phone '0502222222'"
        );
        assert_eq!(c, before);

        c.add_value(Field::Email, "a@example.com").unwrap();
        c.add_value(Field::Email, "b@example.com").unwrap();
        assert!(c
            .replace_value(Field::Email, "a@example.com", "b@example.com")
            .is_err());
        assert_eq!(c.emails, vec!["a@example.com", "b@example.com"]);

        // same value in place is a no-op
        c.replace_value(Field::Email, "a@example.com", "a@example.com")
            .unwrap();
        assert_eq!(c.emails, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn replace_missing_old_value_is_not_found() {
        let mut c = alice();
        c.add_value(Field::Email, "a@example.com").unwrap();
        let err = c
            .replace_value(Field::Email, "b@example.com", "c@example.com")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Contact 'alice' has no email 'b@example.com'"
        );
    }

    #[test]
    fn address_and_tag_edits() {
        let mut c = alice();
        c.add_value(Field::Address, "  1 Main St ").unwrap();
        assert_eq!(c.address.as_deref(), Some("1 Main St"));
        c.replace_value(Field::Address, "1 Main St", "2 High St")
            .unwrap();
        assert_eq!(c.address.as_deref(), Some("2 High St"));

        c.add_value(Field::Tag, "work").unwrap();
        c.replace_value(Field::Tag, "work", "family").unwrap();
        assert!(c.tags.contains("family"));
        assert!(!c.tags.contains("work"));

        c.remove_value(Field::Tag, "family").unwrap();
        assert!(c.tags.is_empty());
        assert!(c.remove_value(Field::Tag, "family").is_err());
    }

    #[test]
    fn matches_name_and_tags_case_insensitively() {
        let mut c = Contact::new("Alice Smith".into(), BTreeSet::new());
        c.add_value(Field::Tag, "Work").unwrap();
        assert!(c.matches("smith"));
        assert!(c.matches("wor"));
        assert!(!c.matches("bob"));
    }
}
