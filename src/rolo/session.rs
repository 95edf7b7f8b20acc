//! The in-memory state of one program run: both stores plus the settings
//! commands need. Built from a snapshot at startup, turned back into one on
//! save.

use crate::directory::Directory;
use crate::notebook::Notebook;
use crate::store::Snapshot;
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone)]
pub struct Session {
    pub contacts: Directory,
    pub notes: Notebook,
    reminder_window_days: u32,
    today: Option<NaiveDate>,
}

impl Session {
    pub fn new(contacts: Directory, notes: Notebook, reminder_window_days: u32) -> Self {
        Self {
            contacts,
            notes,
            reminder_window_days,
            today: None,
        }
    }

    pub fn from_snapshot(snapshot: Snapshot, reminder_window_days: u32) -> Self {
        Self::new(snapshot.contacts, snapshot.notes, reminder_window_days)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::new(self.contacts.clone(), self.notes.clone())
    }

    /// Pins "today" for reminder queries instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn reminder_window_days(&self) -> u32 {
        self.reminder_window_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trip_keeps_stores() {
        let mut contacts = Directory::new();
        contacts.add("alice", ["friend"]).unwrap();
        let mut notes = Notebook::new();
        notes.add("hello").unwrap();

        let session = Session::new(contacts.clone(), notes.clone(), 7);
        let snapshot = session.to_snapshot();
        assert_eq!(snapshot.contacts, contacts);
        assert_eq!(snapshot.notes, notes);

        let back = Session::from_snapshot(snapshot, 3);
        assert_eq!(back.reminder_window_days(), 3);
        assert_eq!(back.contacts, contacts);
    }

    #[test]
    fn pinned_today_wins_over_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let session = Session::new(Directory::new(), Notebook::new(), 7).with_today(day);
        assert_eq!(session.today(), day);
    }
}
