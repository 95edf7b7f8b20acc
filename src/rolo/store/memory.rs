use super::{Snapshot, SnapshotStore};
use crate::error::{Result, RoloError};
use std::cell::RefCell;

/// In-memory snapshot store for testing.
///
/// Keeps the serialized JSON rather than the value, so loads go through the
/// same parsing path as the file store. Uses `RefCell` since rolo is
/// single-threaded.
#[derive(Default)]
pub struct InMemoryStore {
    saved: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw snapshot text, e.g. to simulate corruption.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            saved: RefCell::new(Some(raw.into())),
            ..Default::default()
        }
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn raw(&self) -> Option<String> {
        self.saved.borrow().clone()
    }
}

impl SnapshotStore for InMemoryStore {
    fn load(&self) -> Result<Snapshot> {
        match self.saved.borrow().as_deref() {
            Some(raw) => Snapshot::from_json(raw),
            None => Ok(Snapshot::default()),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RoloError::Io(std::io::Error::other("simulated write error")));
        }
        let raw = snapshot.to_json()?;
        *self.saved.borrow_mut() = Some(raw);
        Ok(())
    }
}
