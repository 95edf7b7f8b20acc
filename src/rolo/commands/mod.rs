//! # Command Layer
//!
//! One function per user-facing operation, split by store:
//! [`contacts`] works on the [`Directory`](crate::directory::Directory),
//! [`notes`] on the [`Notebook`](crate::notebook::Notebook).
//!
//! Commands turn store results into a [`CmdResult`]: the records to list plus
//! leveled messages. They never print and never decide colors; the UI layer
//! renders whatever comes back.
//!
//! Arguments arrive already bound and typed (see [`crate::dispatch`]).
//! Value validation (phones, dates, tags) happens here or in the stores and
//! fails with `InvalidValue`.

use crate::index::DisplayNote;
use crate::model::Contact;
use crate::reminder::Greeting;
use serde::Serialize;

pub mod contacts;
pub mod notes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CmdResult {
    pub listed_contacts: Vec<Contact>,
    pub listed_notes: Vec<DisplayNote>,
    pub greetings: Vec<Greeting>,
    pub messages: Vec<CmdMessage>,
    /// Set when dispatch refused the command (unknown verb or bad arguments).
    pub rejected: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_greetings(mut self, greetings: Vec<Greeting>) -> Self {
        self.greetings = greetings;
        self
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            rejected: true,
            ..Default::default()
        }
        .with_message(CmdMessage::error(message))
    }
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
