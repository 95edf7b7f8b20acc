//! Contact commands.

use super::{plural, CmdMessage, CmdResult};
use crate::directory::Directory;
use crate::error::Result;
use crate::validation::parse_birthday;
use chrono::NaiveDate;

pub fn add(dir: &mut Directory, name: &str, tags: &[String]) -> Result<CmdResult> {
    let contact = dir.add(name, tags)?;
    let message = if contact.tags.is_empty() {
        format!("Contact '{}' added", contact.name)
    } else {
        let tags: Vec<&str> = contact.tags.iter().map(String::as_str).collect();
        format!("Contact '{}' added with tags [{}]", contact.name, tags.join(", "))
    };
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}

pub fn search(dir: &Directory, query: &str) -> Result<CmdResult> {
    let found: Vec<_> = dir.search(query).cloned().collect();
    let result = if found.is_empty() {
        CmdResult::default().with_message(CmdMessage::info(format!(
            "No contacts match '{}'",
            query
        )))
    } else {
        CmdResult::default().with_message(CmdMessage::info(format!(
            "{} contact{} matching '{}':",
            found.len(),
            plural(found.len()),
            query
        )))
    };
    Ok(result.with_listed_contacts(found))
}

pub fn edit(dir: &mut Directory, name: &str, field: &str, old: &str, new: &str) -> Result<CmdResult> {
    let contact = dir.edit(name, field, old, new)?.clone();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Updated {} of '{}': {} -> {}",
            field.to_lowercase(),
            name,
            old,
            new
        )))
        .with_listed_contacts(vec![contact]))
}

pub fn add_field(dir: &mut Directory, name: &str, field: &str, value: &str) -> Result<CmdResult> {
    let message = if dir.add_value(name, field, value)? {
        CmdMessage::success(format!("Added {} '{}' to '{}'", field.to_lowercase(), value, name))
    } else {
        CmdMessage::warning(format!(
            "'{}' already has {} '{}'",
            name,
            field.to_lowercase(),
            value
        ))
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn remove_field(dir: &mut Directory, name: &str, field: &str, value: &str) -> Result<CmdResult> {
    dir.remove_value(name, field, value)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Removed {} '{}' from '{}'",
        field.to_lowercase(),
        value,
        name
    ))))
}

pub fn delete(dir: &mut Directory, name: &str) -> Result<CmdResult> {
    let removed = dir.delete(name)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Contact '{}' deleted",
        removed.name
    ))))
}

pub fn show(dir: &Directory, name: &str) -> Result<CmdResult> {
    let contact = dir.get(name)?.clone();
    Ok(CmdResult::default().with_listed_contacts(vec![contact]))
}

pub fn show_all(dir: &Directory) -> Result<CmdResult> {
    let all: Vec<_> = dir.display_all().cloned().collect();
    let result = if all.is_empty() {
        CmdResult::default().with_message(CmdMessage::info("The contact book is empty"))
    } else {
        CmdResult::default()
    };
    Ok(result.with_listed_contacts(all))
}

pub fn add_birthday(dir: &mut Directory, name: &str, raw_date: &str) -> Result<CmdResult> {
    let date = parse_birthday(raw_date)?;
    dir.add_birthday(name, date)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Birthday of '{}' set to {}",
        name,
        format_date(date)
    ))))
}

pub fn edit_birthday(dir: &mut Directory, name: &str, raw_date: &str) -> Result<CmdResult> {
    let date = parse_birthday(raw_date)?;
    let previous = dir.edit_birthday(name, date)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Birthday of '{}' changed from {} to {}",
        name,
        format_date(previous),
        format_date(date)
    ))))
}

pub fn remove_birthday(dir: &mut Directory, name: &str) -> Result<CmdResult> {
    let previous = dir.remove_birthday(name)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Birthday {} removed from '{}'",
        format_date(previous),
        name
    ))))
}

pub fn show_birthdays(dir: &Directory, today: NaiveDate, within_days: u32) -> Result<CmdResult> {
    let greetings = dir.upcoming_birthdays(today, within_days);
    let message = if greetings.is_empty() {
        CmdMessage::info(format!("No birthdays in the next {} day{}", within_days, plural(within_days as usize)))
    } else {
        CmdMessage::info(format!(
            "{} birthday{} to celebrate in the next {} day{}:",
            greetings.len(),
            plural(greetings.len()),
            within_days,
            plural(within_days as usize)
        ))
    };
    Ok(CmdResult::default()
        .with_message(message)
        .with_greetings(greetings))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
