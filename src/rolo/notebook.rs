//! # Notebook Store
//!
//! Owns the notes in insertion order. Notes are addressed by [`Position`],
//! which always reflects the current order (see [`crate::index`]).
//!
//! Tags are append-only. Tag lookups are exact and case-sensitive: `urgent`
//! does not match `Urgent` or `urgent2`.

use crate::error::{Result, RoloError};
use crate::index::{index_notes, positioned, DisplayNote, Position};
use crate::model::Note;
use crate::validation::parse_tags;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notebook {
    notes: Vec<Note>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Appends a note and returns its position.
    pub fn add(&mut self, content: &str) -> Result<Position> {
        let content = non_empty(content)?;
        self.notes.push(Note::new(content));
        Ok(Position::from_slot(self.notes.len() - 1))
    }

    pub fn get(&self, position: Position) -> Result<&Note> {
        let slot = position.slot(self.notes.len())?;
        Ok(&self.notes[slot])
    }

    pub fn edit(&mut self, position: Position, content: &str) -> Result<&Note> {
        let slot = position.slot(self.notes.len())?;
        let content = non_empty(content)?;
        let note = &mut self.notes[slot];
        note.set_content(content);
        Ok(&*note)
    }

    /// Removes a note. Every later note moves up one position.
    pub fn delete(&mut self, position: Position) -> Result<Note> {
        let slot = position.slot(self.notes.len())?;
        Ok(self.notes.remove(slot))
    }

    /// Notes whose content contains `keyword`, ignoring case.
    pub fn search<'a>(&'a self, keyword: &str) -> impl Iterator<Item = DisplayNote> + 'a {
        let keyword = keyword.to_lowercase();
        positioned(&self.notes)
            .filter(move |(_, note)| note.content.to_lowercase().contains(&keyword))
            .map(|(position, note)| DisplayNote::new(position, note))
    }

    pub fn display_all(&self) -> impl Iterator<Item = DisplayNote> + '_ {
        index_notes(&self.notes)
    }

    /// Unions `tags` into the note's tag set and returns the tags that were new.
    pub fn add_tags<I, T>(&mut self, position: Position, tags: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let slot = position.slot(self.notes.len())?;
        let tags = parse_tags(tags)?;
        if tags.is_empty() {
            return Err(RoloError::InvalidValue("no tags given".to_string()));
        }

        let note = &mut self.notes[slot];
        let added: Vec<String> = tags
            .into_iter()
            .filter(|tag| note.tags.insert(tag.clone()))
            .collect();
        Ok(added)
    }

    pub fn search_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = DisplayNote> + 'a {
        positioned(&self.notes)
            .filter(move |(_, note)| note.tags.contains(tag))
            .map(|(position, note)| DisplayNote::new(position, note))
    }

    /// Notes ordered by their sorted tag lists, compared lexicographically.
    ///
    /// Untagged notes come last. The sort is stable, so notes with equal tags
    /// keep their insertion order. The notebook itself is not reordered.
    pub fn sort_by_tag(&self) -> Vec<DisplayNote> {
        let mut sorted: Vec<DisplayNote> = index_notes(&self.notes).collect();
        sorted.sort_by(|a, b| compare_tags(&a.note, &b.note));
        sorted
    }
}

fn compare_tags(a: &Note, b: &Note) -> Ordering {
    match (a.tags.is_empty(), b.tags.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // BTreeSet iterates in sorted order, so this compares the sorted tag lists
        (false, false) => a.tags.iter().cmp(b.tags.iter()),
    }
}

fn non_empty(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(RoloError::InvalidValue("note content cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
