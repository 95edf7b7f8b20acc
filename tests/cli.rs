use assert_cmd::Command;
use chrono::{Days, Local};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn rolo(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rolo").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("ROLO_HOME")
        .env_remove("RUST_LOG")
        .arg("--home")
        .arg(home);
    cmd
}

#[test]
fn contacts_persist_between_runs() {
    let home = tempfile::tempdir().unwrap();

    rolo(home.path())
        .args(["contacts", "add", "alice", "friend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 'alice' added"));

    rolo(home.path())
        .args(["contacts", "add-field", "alice", "phone", "050 123 4567"])
        .assert()
        .success();

    rolo(home.path())
        .args(["contacts", "show-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("0501234567"))
        .stdout(predicate::str::contains("friend"));

    assert!(home.path().join("data.json").exists());
}

#[test]
fn notes_keep_positions_and_tags() {
    let home = tempfile::tempdir().unwrap();

    rolo(home.path())
        .args(["notes", "add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added at position 1"));
    rolo(home.path())
        .args(["notes", "add", "Call Bob"])
        .assert()
        .success();
    rolo(home.path())
        .args(["notes", "add-tags", "2", "urgent"])
        .assert()
        .success();

    rolo(home.path())
        .args(["notes", "search-tags", "urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. Call Bob [urgent]"))
        .stdout(predicate::str::contains("Buy milk").not());

    rolo(home.path())
        .args(["notes", "delete", "1"])
        .assert()
        .success();
    rolo(home.path())
        .args(["notes", "show-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Call Bob"));
}

#[test]
fn unknown_verb_is_rejected() {
    let home = tempfile::tempdir().unwrap();

    rolo(home.path())
        .args(["contacts", "teleport", "alice"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported operation 'teleport'"));

    rolo(home.path())
        .args(["notes", "delete", "first"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Wrong arguments for 'delete'"));
}

#[test]
fn operation_errors_fail_the_process() {
    let home = tempfile::tempdir().unwrap();

    rolo(home.path())
        .args(["contacts", "delete", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Contact 'ghost' not found"));

    rolo(home.path())
        .args(["contacts", "add", "bob"])
        .assert()
        .success();
    rolo(home.path())
        .args(["contacts", "add", "bob"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    rolo(home.path())
        .args(["notes", "add", "only note"])
        .assert()
        .success();
    rolo(home.path())
        .args(["notes", "delete", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Position 0 is out of range"));
}

#[test]
fn interactive_session_saves_on_exit() {
    let home = tempfile::tempdir().unwrap();

    rolo(home.path())
        .write_stdin("contacts\nadd Carol work\nback\nnotes\nadd \"Plan the trip\"\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Main menu:"))
        .stdout(predicate::str::contains("Contact 'carol' added"))
        .stdout(predicate::str::contains("Good bye!"));

    rolo(home.path())
        .args(["contacts", "search", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("carol"));
    rolo(home.path())
        .args(["notes", "show", "trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan the trip"));
}

#[test]
fn interactive_session_survives_errors() {
    let home = tempfile::tempdir().unwrap();

    rolo(home.path())
        .write_stdin("notes\nedit 9 nothing here\nfly\nadd still works\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("out of range"))
        .stdout(predicate::str::contains("Unsupported operation 'fly'"))
        .stdout(predicate::str::contains("Note added at position 1"));

    rolo(home.path())
        .args(["notes", "show-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("still works"));
}

#[test]
fn upcoming_birthdays_are_listed() {
    let home = tempfile::tempdir().unwrap();
    let soon = Local::now().date_naive() + Days::new(3);
    let birthday = format!("{}.2000", soon.format("%d.%m"));

    rolo(home.path())
        .args(["contacts", "add", "dana"])
        .assert()
        .success();
    rolo(home.path())
        .args(["contacts", "add-birthday", "dana", birthday.as_str()])
        .assert()
        .success();

    rolo(home.path())
        .args(["contacts", "show-birthdays"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dana"));

    rolo(home.path())
        .args(["contacts", "show-birthdays", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No birthdays in the next 1 day"));

    rolo(home.path())
        .args(["contacts", "show-birthdays", "4294967295"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dana"));
}

#[test]
fn corrupt_data_file_is_moved_aside() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join("data.json"), "{ this is not json").unwrap();

    rolo(home.path())
        .args(["contacts", "show-all"])
        .assert()
        .success()
        .stderr(predicate::str::contains("could not be read"))
        .stdout(predicate::str::contains("The contact book is empty"));

    let moved: Vec<String> = fs::read_dir(home.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("data.json.corrupt-"))
        .collect();
    assert_eq!(moved.len(), 1);
    assert_eq!(
        fs::read_to_string(home.path().join(&moved[0])).unwrap(),
        "{ this is not json"
    );
}

#[test]
fn home_can_come_from_the_environment() {
    let home = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("rolo").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("ROLO_HOME", home.path())
        .args(["notes", "add", "from env"])
        .assert()
        .success();

    assert!(home.path().join("data.json").exists());
}

#[test]
fn config_sets_default_reminder_window() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        home.path().join("config.json"),
        r#"{"reminder_window_days": 0, "menu_pause_ms": 0}"#,
    )
    .unwrap();

    rolo(home.path())
        .args(["contacts", "show-birthdays"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No birthdays in the next 0 days"));
}
