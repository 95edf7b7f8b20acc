//! Note commands.

use super::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayNote, Position};
use crate::notebook::Notebook;

pub fn add(notes: &mut Notebook, content: &str) -> Result<CmdResult> {
    let position = notes.add(content)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Note added at position {}",
        position
    ))))
}

pub fn edit(notes: &mut Notebook, position: Position, content: &str) -> Result<CmdResult> {
    let note = notes.edit(position, content)?.clone();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note {} updated", position)))
        .with_listed_notes(vec![DisplayNote { position, note }]))
}

pub fn delete(notes: &mut Notebook, position: Position) -> Result<CmdResult> {
    let removed = notes.delete(position)?;
    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Note {} deleted: {}",
        position,
        preview(&removed.content)
    )));
    if position.get() <= notes.len() {
        result.add_message(CmdMessage::info("Later notes moved up one position"));
    }
    Ok(result)
}

pub fn search(notes: &Notebook, keyword: &str) -> Result<CmdResult> {
    let found: Vec<DisplayNote> = notes.search(keyword).collect();
    Ok(listing(
        found,
        format!("Notes that contain '{}':", keyword),
        format!("No notes contain '{}'", keyword),
    ))
}

pub fn show_all(notes: &Notebook) -> Result<CmdResult> {
    let all: Vec<DisplayNote> = notes.display_all().collect();
    Ok(listing(
        all,
        "All notes:".to_string(),
        "The notebook is empty".to_string(),
    ))
}

pub fn add_tags(notes: &mut Notebook, position: Position, tags: &[String]) -> Result<CmdResult> {
    let added = notes.add_tags(position, tags)?;
    let message = if added.is_empty() {
        CmdMessage::warning(format!(
            "Note {} already has tag{} [{}]",
            position,
            plural(tags.len()),
            tags.join(", ")
        ))
    } else {
        CmdMessage::success(format!(
            "Added tag{} [{}] to note {}",
            plural(added.len()),
            added.join(", "),
            position
        ))
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn search_tags(notes: &Notebook, tag: &str) -> Result<CmdResult> {
    let found: Vec<DisplayNote> = notes.search_by_tag(tag).collect();
    Ok(listing(
        found,
        format!("Notes that contain tag '{}':", tag),
        format!("No notes are tagged '{}'", tag),
    ))
}

pub fn sort_tags(notes: &Notebook) -> Result<CmdResult> {
    Ok(listing(
        notes.sort_by_tag(),
        "Sorted notes by tags:".to_string(),
        "The notebook is empty".to_string(),
    ))
}

fn listing(notes: Vec<DisplayNote>, header: String, empty: String) -> CmdResult {
    let message = if notes.is_empty() {
        CmdMessage::info(empty)
    } else {
        CmdMessage::info(header)
    };
    CmdResult::default()
        .with_message(message)
        .with_listed_notes(notes)
}

fn preview(content: &str) -> String {
    const PREVIEW_CHARS: usize = 40;
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() > PREVIEW_CHARS || content.lines().count() > 1 {
        let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}
