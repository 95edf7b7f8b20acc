//! Menu and banner text for the interactive mode.

use once_cell::sync::Lazy;
use rolo::dispatch::Target;

pub const WELCOME: &str = "Welcome to rolo, your contacts and notes assistant!";
pub const LEAVE: &str = "Good bye!";
pub const BACK: &str = "Back to the main menu";
pub const PROMPT: &str = "Enter a command: ";

pub static MAIN_MENU: Lazy<String> = Lazy::new(|| {
    [
        "Main menu:",
        "  contacts      manage contacts and birthdays",
        "  notes         manage notes and tags",
        "  help          show this menu",
        "  close, exit   save and quit",
    ]
    .join("\n")
});

static CONTACTS_MENU: Lazy<String> = Lazy::new(|| submenu(Target::Contacts));
static NOTES_MENU: Lazy<String> = Lazy::new(|| submenu(Target::Notes));

pub fn menu_for(target: Target) -> &'static str {
    match target {
        Target::Contacts => &CONTACTS_MENU,
        Target::Notes => &NOTES_MENU,
    }
}

pub fn unknown_command(command: &str) -> String {
    format!("Unknown command '{}'. Type 'help' to see the menu.", command)
}

fn submenu(target: Target) -> String {
    let rows: Vec<(String, &str)> = target
        .operations()
        .iter()
        .map(|op| {
            let synopsis = match op.usage() {
                "" => op.verb().to_string(),
                usage => format!("{} {}", op.verb(), usage),
            };
            (synopsis, op.summary())
        })
        .chain([
            ("help".to_string(), "show this menu"),
            ("back".to_string(), "return to the main menu"),
            ("close, exit".to_string(), "save and quit"),
        ])
        .collect();
    let width = rows.iter().map(|(s, _)| s.len()).max().unwrap_or(0);

    let mut out = format!("{} menu:", capitalize(target.name()));
    for (synopsis, summary) in rows {
        out.push_str(&format!("\n  {:<width$}  {}", synopsis, summary, width = width));
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
