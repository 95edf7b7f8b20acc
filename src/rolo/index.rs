//! # Note Positions
//!
//! Notes are addressed by their 1-based position in the notebook. Positions are
//! never stored: every listing derives them from the notebook's current order,
//! so deleting note 2 turns the old note 3 into the new note 2.
//!
//! Each note also carries a UUID (`Note::id`), which stays fixed for its whole
//! life. It is not part of the user-facing contract today.
//!
//! Derived views (search results, sort-by-tag) keep each note's canonical
//! position, so `notes edit 3 ...` targets the same note no matter which view
//! showed it.
//!
//! **Developer Note**: When implementing listings, always go through
//! [`index_notes`]. Never enumerate a filtered list, as that breaks the
//! position association.

use crate::error::{Result, RoloError};
use crate::model::Note;
use serde::Serialize;
use std::str::FromStr;

/// A 1-based position in the notebook.
///
/// Parsed positions may be `0`; like any position past the end, it fails
/// with `OutOfRange` when resolved against the notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position(usize);

impl Position {
    pub fn new(position: usize) -> Option<Self> {
        (position >= 1).then_some(Self(position))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub(crate) fn from_slot(slot: usize) -> Self {
        Self(slot + 1)
    }

    /// Zero-based slot, checked against the number of notes.
    pub(crate) fn slot(self, count: usize) -> Result<usize> {
        if self.0 == 0 || self.0 > count {
            return Err(RoloError::OutOfRange {
                position: self.0,
                count,
            });
        }
        Ok(self.0 - 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Position)
            .map_err(|_| format!("'{}' is not a note position", s))
    }
}

/// A note paired with its canonical position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNote {
    pub position: Position,
    pub note: Note,
}

impl DisplayNote {
    pub(crate) fn new(position: Position, note: &Note) -> Self {
        Self {
            position,
            note: note.clone(),
        }
    }
}

/// Pairs notes with their positions without cloning, for filtering before display.
pub(crate) fn positioned(notes: &[Note]) -> impl Iterator<Item = (Position, &Note)> {
    notes
        .iter()
        .enumerate()
        .map(|(slot, note)| (Position::from_slot(slot), note))
}

/// Assigns canonical positions to notes in stored order.
pub fn index_notes(notes: &[Note]) -> impl Iterator<Item = DisplayNote> + '_ {
    positioned(notes).map(|(position, note)| DisplayNote::new(position, note))
}
