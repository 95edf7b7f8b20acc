//! # API Facade
//!
//! The single entry point for rolo operations, whatever the UI. It owns the
//! [`Session`] and a [`SnapshotStore`], and nothing else:
//!
//! - [`RoloApi::run`] hands `(target, verb, args)` to [`crate::dispatch`]
//! - [`RoloApi::save`] writes the session back through the store
//!
//! No business logic lives here, and nothing here prints.
//!
//! ## Generic Over SnapshotStore
//!
//! - Production: `RoloApi<FileStore>`
//! - Testing: `RoloApi<InMemoryStore>`

use crate::commands::CmdResult;
use crate::dispatch::{self, Target};
use crate::error::Result;
use crate::session::Session;
use crate::store::SnapshotStore;

pub use crate::commands::{CmdMessage, MessageLevel};

pub struct RoloApi<S: SnapshotStore> {
    store: S,
    session: Session,
}

impl<S: SnapshotStore> RoloApi<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self { store, session }
    }

    /// Loads the stored snapshot into a fresh session.
    pub fn open(store: S, reminder_window_days: u32) -> Result<Self> {
        let snapshot = store.load()?;
        let session = Session::from_snapshot(snapshot, reminder_window_days);
        Ok(Self::new(store, session))
    }

    pub fn run<A: AsRef<str>>(&mut self, target: Target, verb: &str, args: &[A]) -> Result<CmdResult> {
        dispatch::dispatch(&mut self.session, target, verb, args)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.session.to_snapshot())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
