//! # Directory Store
//!
//! Owns every [`Contact`], in insertion order. The contact name is the primary
//! key: [`Directory::add`] refuses a name that is already taken, and every
//! other operation looks the contact up by name and fails with
//! [`RoloError::NotFound`] when it is missing.
//!
//! Each mutation validates its inputs before touching the record, so a failed
//! call leaves the directory exactly as it was.

use crate::error::{Result, RoloError};
use crate::model::{Contact, Field};
use crate::reminder::{self, Greeting};
use crate::validation::parse_tags;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Contact>", into = "Vec<Contact>")]
pub struct Directory {
    contacts: Vec<Contact>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn add<I, T>(&mut self, name: &str, tags: I) -> Result<&Contact>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(RoloError::InvalidValue("name cannot be empty".to_string()));
        }
        if self.position(name).is_some() {
            return Err(RoloError::DuplicateName(name.to_string()));
        }

        let tags = parse_tags(tags)?.into_iter().collect();
        self.contacts.push(Contact::new(name.to_string(), tags));
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    pub fn get(&self, name: &str) -> Result<&Contact> {
        self.contacts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| RoloError::contact_not_found(name))
    }

    /// Contacts whose name or tags contain `query`, ignoring case.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Contact> + 'a {
        let query = query.to_lowercase();
        self.contacts.iter().filter(move |c| c.matches(&query))
    }

    pub fn display_all(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    /// Replaces the value equal to `old` in the named field with `new`.
    pub fn edit(&mut self, name: &str, field: &str, old: &str, new: &str) -> Result<&Contact> {
        let field: Field = field.parse()?;
        let contact = self.get_mut(name)?;
        contact.replace_value(field, old, new)?;
        Ok(&*contact)
    }

    /// Returns whether the contact changed; adding a value it already has is a no-op.
    pub fn add_value(&mut self, name: &str, field: &str, value: &str) -> Result<bool> {
        let field: Field = field.parse()?;
        self.get_mut(name)?.add_value(field, value)
    }

    pub fn remove_value(&mut self, name: &str, field: &str, value: &str) -> Result<()> {
        let field: Field = field.parse()?;
        self.get_mut(name)?.remove_value(field, value)
    }

    pub fn delete(&mut self, name: &str) -> Result<Contact> {
        let slot = self
            .position(name)
            .ok_or_else(|| RoloError::contact_not_found(name))?;
        Ok(self.contacts.remove(slot))
    }

    pub fn add_birthday(&mut self, name: &str, birthday: NaiveDate) -> Result<()> {
        let contact = self.get_mut(name)?;
        if let Some(existing) = contact.birthday {
            return Err(RoloError::InvalidValue(format!(
                "'{}' already has a birthday ({}); use edit-birthday to change it",
                name,
                existing.format("%d.%m.%Y")
            )));
        }
        contact.birthday = Some(birthday);
        Ok(())
    }

    /// Replaces an existing birthday, returning the previous one.
    pub fn edit_birthday(&mut self, name: &str, birthday: NaiveDate) -> Result<NaiveDate> {
        let contact = self.get_mut(name)?;
        let previous = contact.birthday.ok_or_else(|| no_birthday(name))?;
        contact.birthday = Some(birthday);
        Ok(previous)
    }

    pub fn remove_birthday(&mut self, name: &str) -> Result<NaiveDate> {
        self.get_mut(name)?
            .birthday
            .take()
            .ok_or_else(|| no_birthday(name))
    }

    pub fn upcoming_birthdays(&self, today: NaiveDate, within_days: u32) -> Vec<Greeting> {
        reminder::upcoming(&self.contacts, today, within_days)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Contact> {
        self.contacts
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| RoloError::contact_not_found(name))
    }
}

fn no_birthday(name: &str) -> RoloError {
    RoloError::NotFound(format!("Contact '{}' has no birthday", name))
}

impl TryFrom<Vec<Contact>> for Directory {
    type Error = String;

    fn try_from(contacts: Vec<Contact>) -> std::result::Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::new();
        for contact in &contacts {
            if !seen.insert(contact.name.as_str()) {
                return Err(format!("duplicate contact name '{}'", contact.name));
            }
        }
        Ok(Self { contacts })
    }
}

impl From<Directory> for Vec<Contact> {
    fn from(directory: Directory) -> Self {
        directory.contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_TAGS: [&str; 0] = [];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_creates_empty_contact() {
        let mut dir = Directory::new();
        let c = dir.add("alice", ["friend"]).unwrap();
        assert_eq!(c.name, "alice");
        assert!(c.phones.is_empty());
        assert!(c.birthday.is_none());
        assert!(c.tags.contains("friend"));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut dir = Directory::new();
        dir.add("Alice", NO_TAGS).unwrap();
        let err = dir.add("Alice", ["other"]).unwrap_err();
        assert!(matches!(err, RoloError::DuplicateName(ref n) if n == "Alice"));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn invalid_tag_leaves_directory_unchanged() {
        let mut dir = Directory::new();
        assert!(matches!(
            dir.add("alice", ["ok", "not ok"]),
            Err(RoloError::InvalidValue(_))
        ));
        assert!(dir.is_empty());
    }

    #[test]
    fn delete_then_lookup_fails() {
        let mut dir = Directory::new();
        dir.add("bob", NO_TAGS).unwrap();
        dir.delete("bob").unwrap();

        assert!(matches!(dir.delete("bob"), Err(RoloError::NotFound(_))));
        assert!(matches!(dir.get("bob"), Err(RoloError::NotFound(_))));
        assert!(matches!(
            dir.edit("bob", "phone", "0501111111", "0502222222"),
            Err(RoloError::NotFound(_))
        ));
        assert!(matches!(
            dir.add_birthday("bob", date(1990, 1, 1)),
            Err(RoloError::NotFound(_))
        ));
        assert!(matches!(
            dir.remove_birthday("bob"),
            Err(RoloError::NotFound(_))
        ));
    }

    #[test]
    fn search_matches_name_and_tags_in_store_order() {
        let mut dir = Directory::new();
        dir.add("Carol", ["work"]).unwrap();
        dir.add("alice", NO_TAGS).unwrap();
        dir.add("bob", ["Coworker"]).unwrap();

        let names: Vec<&str> = dir.search("CO").map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "bob"]);
        assert_eq!(dir.search("nobody").count(), 0);
    }

    #[test]
    fn edit_replaces_named_field_value() {
        let mut dir = Directory::new();
        dir.add("alice", NO_TAGS).unwrap();
        dir.add_value("alice", "phone", "0501111111").unwrap();

        let c = dir.edit("alice", "phone", "0501111111", "0502222222").unwrap();
        assert_eq!(c.phones, vec!["0502222222"]);

        assert!(matches!(
            dir.edit("alice", "fax", "1", "2"),
            Err(RoloError::NotFound(_))
        ));
        assert!(matches!(
            dir.edit("alice", "phone", "0509999999", "0502222222"),
            Err(RoloError::NotFound(_))
        ));
    }

    #[test]
    fn birthday_lifecycle() {
        let mut dir = Directory::new();
        dir.add("alice", NO_TAGS).unwrap();

        assert!(matches!(
            dir.edit_birthday("alice", date(1990, 1, 1)),
            Err(RoloError::NotFound(_))
        ));

        dir.add_birthday("alice", date(1990, 1, 1)).unwrap();
        assert!(matches!(
            dir.add_birthday("alice", date(1991, 1, 1)),
            Err(RoloError::InvalidValue(_))
        ));

        let previous = dir.edit_birthday("alice", date(1992, 2, 2)).unwrap();
        assert_eq!(previous, date(1990, 1, 1));
        assert_eq!(dir.get("alice").unwrap().birthday, Some(date(1992, 2, 2)));

        dir.remove_birthday("alice").unwrap();
        assert!(dir.get("alice").unwrap().birthday.is_none());
        assert!(matches!(
            dir.remove_birthday("alice"),
            Err(RoloError::NotFound(_))
        ));
    }

    #[test]
    fn upcoming_birthdays_uses_reminder_window() {
        let mut dir = Directory::new();
        dir.add("alice", NO_TAGS).unwrap();
        dir.add("bob", NO_TAGS).unwrap();
        dir.add_birthday("alice", date(1990, 3, 10)).unwrap();

        let due = dir.upcoming_birthdays(date(2024, 3, 8), 5);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].name, "alice");
        assert!(dir.upcoming_birthdays(date(2024, 3, 8), 1).is_empty());
    }

    #[test]
    fn deserializing_duplicates_fails() {
        let json = r#"[{"name":"a"},{"name":"a"}]"#;
        let err = serde_json::from_str::<Directory>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate contact name 'a'"));
    }
}
