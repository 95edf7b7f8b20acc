//! # Command Dispatch
//!
//! Maps `(target, verb, args)` onto a typed [`Invocation`] and runs it against
//! a [`Session`]. Three steps, each separately testable:
//!
//! 1. [`resolve`]: verb string to [`Operation`] (`UnsupportedOperation` if unknown)
//! 2. [`bind`]: raw arguments to a typed [`Invocation`] (`ArityMismatch` on
//!    wrong count or shape)
//! 3. [`execute`]: call into the command layer
//!
//! [`dispatch`] chains them and turns the two rejection kinds into a rejected
//! [`CmdResult`]. Dispatch owns no state.

use crate::commands::{self, CmdResult};
use crate::error::{Result, RoloError};
use crate::index::Position;
use crate::session::Session;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Contacts,
    Notes,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::Contacts => "contacts",
            Target::Notes => "notes",
        }
    }

    /// Every operation of this target, in menu order.
    pub fn operations(self) -> &'static [Operation] {
        match self {
            Target::Contacts => CONTACT_OPERATIONS,
            Target::Notes => NOTE_OPERATIONS,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddContact,
    SearchContacts,
    EditContact,
    DeleteContact,
    ShowContacts,
    ShowContact,
    AddField,
    RemoveField,
    AddBirthday,
    EditBirthday,
    RemoveBirthday,
    ShowBirthdays,
    AddNote,
    EditNote,
    DeleteNote,
    SearchNotes,
    ShowNotes,
    AddTags,
    SearchTags,
    SortTags,
}

const CONTACT_OPERATIONS: &[Operation] = &[
    Operation::AddContact,
    Operation::SearchContacts,
    Operation::EditContact,
    Operation::DeleteContact,
    Operation::ShowContacts,
    Operation::ShowContact,
    Operation::AddField,
    Operation::RemoveField,
    Operation::AddBirthday,
    Operation::ShowBirthdays,
    Operation::RemoveBirthday,
    Operation::EditBirthday,
];

const NOTE_OPERATIONS: &[Operation] = &[
    Operation::AddNote,
    Operation::EditNote,
    Operation::DeleteNote,
    Operation::SearchNotes,
    Operation::ShowNotes,
    Operation::AddTags,
    Operation::SearchTags,
    Operation::SortTags,
];

/// How many arguments an operation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    AtMost(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::AtMost(n) => count <= n,
        }
    }
}

impl Operation {
    pub fn verb(self) -> &'static str {
        use Operation::*;
        match self {
            AddContact | AddNote => "add",
            SearchContacts => "search",
            EditContact | EditNote => "edit",
            DeleteContact | DeleteNote => "delete",
            ShowContacts | ShowNotes => "show-all",
            ShowContact | SearchNotes => "show",
            AddField => "add-field",
            RemoveField => "remove-field",
            AddBirthday => "add-birthday",
            EditBirthday => "edit-birthday",
            RemoveBirthday => "remove-birthday",
            ShowBirthdays => "show-birthdays",
            AddTags => "add-tags",
            SearchTags => "search-tags",
            SortTags => "sort-tags",
        }
    }

    pub fn target(self) -> Target {
        use Operation::*;
        match self {
            AddNote | EditNote | DeleteNote | SearchNotes | ShowNotes | AddTags | SearchTags
            | SortTags => Target::Notes,
            _ => Target::Contacts,
        }
    }

    /// Argument synopsis, e.g. `<name> [tags...]`.
    pub fn usage(self) -> &'static str {
        use Operation::*;
        match self {
            AddContact => "<name> [tags...]",
            SearchContacts => "<query>",
            EditContact => "<name> <field> <old> <new>",
            DeleteContact | ShowContact | RemoveBirthday => "<name>",
            ShowContacts | ShowNotes | SortTags => "",
            AddField | RemoveField => "<name> <field> <value>",
            AddBirthday | EditBirthday => "<name> <date>",
            ShowBirthdays => "[days]",
            AddNote => "<content...>",
            EditNote => "<position> <content...>",
            DeleteNote => "<position>",
            SearchNotes => "<keyword>",
            AddTags => "<position> <tags...>",
            SearchTags => "<tag>",
        }
    }

    pub fn summary(self) -> &'static str {
        use Operation::*;
        match self {
            AddContact => "add a contact with optional tags",
            SearchContacts => "find contacts by name or tag",
            EditContact => "replace a phone, email, address or tag",
            DeleteContact => "delete a contact",
            ShowContacts => "show all contacts",
            ShowContact => "show one contact",
            AddField => "add a phone, email, address or tag",
            RemoveField => "remove a phone, email, address or tag",
            AddBirthday => "set a birthday (DD.MM.YYYY)",
            EditBirthday => "change a birthday",
            RemoveBirthday => "remove a birthday",
            ShowBirthdays => "birthdays coming up in the next days",
            AddNote => "add a note",
            EditNote => "replace a note's text",
            DeleteNote => "delete a note",
            SearchNotes => "find notes containing a keyword",
            ShowNotes => "show all notes",
            AddTags => "tag a note",
            SearchTags => "find notes with a tag",
            SortTags => "show notes sorted by tags",
        }
    }

    pub fn arity(self) -> Arity {
        use Operation::*;
        match self {
            AddContact | AddNote => Arity::AtLeast(1),
            SearchContacts | DeleteContact | ShowContact | RemoveBirthday | DeleteNote
            | SearchNotes | SearchTags => Arity::Exact(1),
            EditContact => Arity::Exact(4),
            ShowContacts | ShowNotes | SortTags => Arity::Exact(0),
            AddField | RemoveField => Arity::Exact(3),
            AddBirthday | EditBirthday => Arity::Exact(2),
            ShowBirthdays => Arity::AtMost(1),
            EditNote | AddTags => Arity::AtLeast(2),
        }
    }

    fn mismatch(self) -> RoloError {
        let expected = match self.usage() {
            "" => "no arguments".to_string(),
            usage => usage.to_string(),
        };
        RoloError::ArityMismatch {
            verb: self.verb().to_string(),
            expected,
        }
    }
}

/// An operation with its arguments bound and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    AddContact { name: String, tags: Vec<String> },
    SearchContacts { query: String },
    EditContact { name: String, field: String, old: String, new: String },
    DeleteContact { name: String },
    ShowContacts,
    ShowContact { name: String },
    AddField { name: String, field: String, value: String },
    RemoveField { name: String, field: String, value: String },
    AddBirthday { name: String, date: String },
    EditBirthday { name: String, date: String },
    RemoveBirthday { name: String },
    /// `None` uses the session's configured window.
    ShowBirthdays { days: Option<u32> },
    AddNote { content: String },
    EditNote { position: Position, content: String },
    DeleteNote { position: Position },
    SearchNotes { keyword: String },
    ShowNotes,
    AddTags { position: Position, tags: Vec<String> },
    SearchTags { tag: String },
    SortTags,
}

pub fn resolve(target: Target, verb: &str) -> Result<Operation> {
    target
        .operations()
        .iter()
        .copied()
        .find(|op| op.verb() == verb)
        .ok_or_else(|| RoloError::UnsupportedOperation(verb.to_string()))
}

pub fn bind<S: AsRef<str>>(op: Operation, args: &[S]) -> Result<Invocation> {
    if !op.arity().accepts(args.len()) {
        return Err(op.mismatch());
    }
    let arg = |i: usize| args[i].as_ref().to_string();
    let rest = |from: usize| -> Vec<String> {
        args[from..].iter().map(|a| a.as_ref().to_string()).collect()
    };
    let position = |i: usize| -> Result<Position> {
        args[i].as_ref().parse().map_err(|_| op.mismatch())
    };

    let invocation = match op {
        Operation::AddContact => Invocation::AddContact {
            name: arg(0),
            tags: rest(1),
        },
        Operation::SearchContacts => Invocation::SearchContacts { query: arg(0) },
        Operation::EditContact => Invocation::EditContact {
            name: arg(0),
            field: arg(1),
            old: arg(2),
            new: arg(3),
        },
        Operation::DeleteContact => Invocation::DeleteContact { name: arg(0) },
        Operation::ShowContacts => Invocation::ShowContacts,
        Operation::ShowContact => Invocation::ShowContact { name: arg(0) },
        Operation::AddField => Invocation::AddField {
            name: arg(0),
            field: arg(1),
            value: arg(2),
        },
        Operation::RemoveField => Invocation::RemoveField {
            name: arg(0),
            field: arg(1),
            value: arg(2),
        },
        Operation::AddBirthday => Invocation::AddBirthday {
            name: arg(0),
            date: arg(1),
        },
        Operation::EditBirthday => Invocation::EditBirthday {
            name: arg(0),
            date: arg(1),
        },
        Operation::RemoveBirthday => Invocation::RemoveBirthday { name: arg(0) },
        Operation::ShowBirthdays => {
            let days = match args.first() {
                Some(raw) => Some(raw.as_ref().trim().parse::<u32>().map_err(|_| op.mismatch())?),
                None => None,
            };
            Invocation::ShowBirthdays { days }
        }
        Operation::AddNote => Invocation::AddNote {
            content: rest(0).join(" "),
        },
        Operation::EditNote => Invocation::EditNote {
            position: position(0)?,
            content: rest(1).join(" "),
        },
        Operation::DeleteNote => Invocation::DeleteNote {
            position: position(0)?,
        },
        Operation::SearchNotes => Invocation::SearchNotes { keyword: arg(0) },
        Operation::ShowNotes => Invocation::ShowNotes,
        Operation::AddTags => Invocation::AddTags {
            position: position(0)?,
            tags: rest(1),
        },
        Operation::SearchTags => Invocation::SearchTags { tag: arg(0) },
        Operation::SortTags => Invocation::SortTags,
    };
    Ok(invocation)
}

pub fn execute(session: &mut Session, invocation: Invocation) -> Result<CmdResult> {
    use commands::{contacts, notes};

    match invocation {
        Invocation::AddContact { name, tags } => contacts::add(&mut session.contacts, &name, &tags),
        Invocation::SearchContacts { query } => contacts::search(&session.contacts, &query),
        Invocation::EditContact {
            name,
            field,
            old,
            new,
        } => contacts::edit(&mut session.contacts, &name, &field, &old, &new),
        Invocation::DeleteContact { name } => contacts::delete(&mut session.contacts, &name),
        Invocation::ShowContacts => contacts::show_all(&session.contacts),
        Invocation::ShowContact { name } => contacts::show(&session.contacts, &name),
        Invocation::AddField { name, field, value } => {
            contacts::add_field(&mut session.contacts, &name, &field, &value)
        }
        Invocation::RemoveField { name, field, value } => {
            contacts::remove_field(&mut session.contacts, &name, &field, &value)
        }
        Invocation::AddBirthday { name, date } => {
            contacts::add_birthday(&mut session.contacts, &name, &date)
        }
        Invocation::EditBirthday { name, date } => {
            contacts::edit_birthday(&mut session.contacts, &name, &date)
        }
        Invocation::RemoveBirthday { name } => {
            contacts::remove_birthday(&mut session.contacts, &name)
        }
        Invocation::ShowBirthdays { days } => {
            let window = days.unwrap_or_else(|| session.reminder_window_days());
            contacts::show_birthdays(&session.contacts, session.today(), window)
        }
        Invocation::AddNote { content } => notes::add(&mut session.notes, &content),
        Invocation::EditNote { position, content } => {
            notes::edit(&mut session.notes, position, &content)
        }
        Invocation::DeleteNote { position } => notes::delete(&mut session.notes, position),
        Invocation::SearchNotes { keyword } => notes::search(&session.notes, &keyword),
        Invocation::ShowNotes => notes::show_all(&session.notes),
        Invocation::AddTags { position, tags } => {
            notes::add_tags(&mut session.notes, position, &tags)
        }
        Invocation::SearchTags { tag } => notes::search_tags(&session.notes, &tag),
        Invocation::SortTags => notes::sort_tags(&session.notes),
    }
}

/// Resolves, binds and executes one command.
///
/// Unknown verbs and malformed arguments come back as a rejected
/// [`CmdResult`]; every other failure is returned as `Err`.
pub fn dispatch<S: AsRef<str>>(
    session: &mut Session,
    target: Target,
    verb: &str,
    args: &[S],
) -> Result<CmdResult> {
    let bound = resolve(target, verb).and_then(|op| bind(op, args));
    let invocation = match bound {
        Ok(invocation) => invocation,
        Err(e) if e.is_rejection() => {
            tracing::debug!(%target, verb, error = %e, "command rejected");
            return Ok(CmdResult::rejected(e.to_string()));
        }
        Err(e) => return Err(e),
    };
    tracing::debug!(%target, ?invocation, "dispatching");
    execute(session, invocation)
}
