//! # Rendering
//!
//! Turns a [`CmdResult`] into terminal text. Everything returns a `String` so
//! it can be tested without capturing stdout; [`print_result`] is the only
//! function that writes.
//!
//! Layout math (column widths, truncation) uses display width, not byte or
//! char counts, so names with wide characters still line up.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use colored::Colorize;
use rolo::api::{CmdMessage, MessageLevel};
use rolo::commands::CmdResult;
use rolo::index::DisplayNote;
use rolo::model::Contact;
use rolo::reminder::{occurrence_in, Greeting};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const COLUMN_MAX: usize = 28;
const TABLE_HEADERS: [&str; 6] = ["Name", "Phones", "Emails", "Birthday", "Address", "Tags"];

pub fn print_result(result: &CmdResult) {
    print!("{}", render_result(result));
}

pub fn render_result(result: &CmdResult) -> String {
    let mut out = render_messages(&result.messages);
    if !result.listed_contacts.is_empty() {
        out.push_str(&render_contacts(&result.listed_contacts));
    }
    if !result.listed_notes.is_empty() {
        out.push_str(&render_notes(&result.listed_notes));
    }
    if !result.greetings.is_empty() {
        out.push_str(&render_greetings(&result.greetings));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn render_error(error: &rolo::error::RoloError) -> String {
    format!("{}\n", error.to_string().red())
}

/// Contacts as a padded table, one row per contact.
pub fn render_contacts(contacts: &[Contact]) -> String {
    let rows: Vec<[String; 6]> = contacts.iter().map(contact_row).collect();

    let mut widths = TABLE_HEADERS.map(|h| h.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width().min(COLUMN_MAX));
        }
    }

    let mut out = String::new();
    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad_to_width(h, w))
        .collect();
    out.push_str(&format!("{}\n", header.join(" | ").trim_end().bold()));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| pad_to_width(&truncate_to_width(cell, w), w))
            .collect();
        out.push_str(&format!("{}\n", cells.join(" | ").trim_end()));
    }
    out
}

fn contact_row(contact: &Contact) -> [String; 6] {
    [
        contact.name.clone(),
        contact.phones.join(", "),
        contact.emails.join(", "),
        contact
            .birthday
            .map(|d| d.format("%d.%m.%Y").to_string())
            .unwrap_or_default(),
        contact.address.clone().unwrap_or_default(),
        contact
            .tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

pub fn render_notes(notes: &[DisplayNote]) -> String {
    let mut out = String::new();
    for dn in notes {
        let index = format!("{:>3}. ", dn.position.get());
        let tags = if dn.note.tags.is_empty() {
            String::new()
        } else {
            let tags: Vec<&str> = dn.note.tags.iter().map(String::as_str).collect();
            format!(" [{}]", tags.join(", "))
        };
        let time_ago = format_time_ago(dn.note.created_at);

        let flat: String = dn
            .note
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let fixed = index.width() + tags.width() + TIME_WIDTH + 1;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let content = truncate_to_width(&flat, available);
        let padding = available.saturating_sub(content.width());

        out.push_str(&format!(
            "{}{}{}{} {}\n",
            index.yellow(),
            content,
            tags.cyan(),
            " ".repeat(padding),
            time_ago.dimmed()
        ));
    }
    out
}

pub fn render_greetings(greetings: &[Greeting]) -> String {
    let name_width = greetings
        .iter()
        .map(|g| g.name.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for g in greetings {
        let when = g.greeting_date.format("%a %d.%m.%Y").to_string();
        let occurrence = birthday_before(g);
        let moved = if occurrence != g.greeting_date {
            format!(" (birthday on {})", occurrence.format("%a %d.%m"))
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{}  {}{}\n",
            when.green(),
            pad_to_width(&g.name, name_width),
            moved.dimmed()
        ));
    }
    out
}

/// The birthday occurrence a greeting was moved from (at most two days back).
fn birthday_before(g: &Greeting) -> NaiveDate {
    let year = g.greeting_date.year();
    let occurrence = occurrence_in(g.birthday, year);
    if occurrence > g.greeting_date {
        occurrence_in(g.birthday, year - 1)
    } else {
        occurrence
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
