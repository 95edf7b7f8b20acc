//! The interactive menu loop.
//!
//! A main menu switches into the contacts or notes submenu; each submenu
//! hands `verb args...` lines to the API until `back`. `close`/`exit` quit
//! from anywhere, and so does end of input. Errors are printed and the loop
//! keeps going.

use super::messages::{menu_for, unknown_command, BACK, LEAVE, MAIN_MENU, PROMPT, WELCOME};
use super::render::{render_error, render_result};
use colored::Colorize;
use rolo::api::RoloApi;
use rolo::dispatch::Target;
use rolo::error::Result;
use rolo::store::SnapshotStore;
use std::io::{BufRead, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    Main,
    Sub(Target),
}

pub struct Repl<'a, S: SnapshotStore, W: Write> {
    api: &'a mut RoloApi<S>,
    out: W,
    pause: Option<Duration>,
}

impl<'a, S: SnapshotStore, W: Write> Repl<'a, S, W> {
    pub fn new(api: &'a mut RoloApi<S>, out: W) -> Self {
        Self {
            api,
            out,
            pause: None,
        }
    }

    /// Sleep this long after showing a menu.
    pub fn with_pause(mut self, pause: Option<Duration>) -> Self {
        self.pause = pause;
        self
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "{}", WELCOME)?;
        self.show_main_menu()?;

        let mut menu = Menu::Main;
        let mut lines = input.lines();
        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(self.out)?;
                break;
            };
            let line = line?;
            // Contact names and commands are case-insensitive; note text is not.
            let line = match menu {
                Menu::Sub(Target::Notes) => line.trim().to_string(),
                _ => line.trim().to_lowercase(),
            };
            let tokens = tokenize(&line);
            let Some((command, args)) = tokens.split_first() else {
                continue;
            };

            match (menu, command.as_str()) {
                (_, "close" | "exit") => break,
                (Menu::Main, "contacts") => menu = self.enter(Target::Contacts)?,
                (Menu::Main, "notes") => menu = self.enter(Target::Notes)?,
                (Menu::Main, "help") => self.show_main_menu()?,
                (Menu::Main, other) => {
                    writeln!(self.out, "{}", unknown_command(other).red())?;
                }
                (Menu::Sub(_), "back") => {
                    writeln!(self.out, "{}", BACK.yellow())?;
                    self.show_main_menu()?;
                    menu = Menu::Main;
                }
                (Menu::Sub(target), "help") => {
                    writeln!(self.out, "{}", menu_for(target).green())?;
                }
                (Menu::Sub(target), verb) => self.run_command(target, verb, args)?,
            }
        }

        writeln!(self.out, "{}", LEAVE)?;
        Ok(())
    }

    fn enter(&mut self, target: Target) -> Result<Menu> {
        tracing::debug!(%target, "entering menu");
        writeln!(self.out, "{}", menu_for(target).green())?;
        self.pause();
        Ok(Menu::Sub(target))
    }

    fn show_main_menu(&mut self) -> Result<()> {
        writeln!(self.out, "{}", MAIN_MENU.as_str().green())?;
        self.pause();
        Ok(())
    }

    fn run_command(&mut self, target: Target, verb: &str, args: &[String]) -> Result<()> {
        let text = match self.api.run(target, verb, args) {
            Ok(result) => render_result(&result),
            Err(e) => {
                tracing::debug!(%target, verb, error = %e, "command failed");
                render_error(&e)
            }
        };
        write!(self.out, "{}", text)?;
        Ok(())
    }

    fn pause(&self) {
        if let Some(pause) = self.pause {
            std::thread::sleep(pause);
        }
    }
}

/// Splits a command line on whitespace; double quotes group words into one
/// argument. An unterminated quote runs to the end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}
