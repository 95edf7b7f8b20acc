use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("ROLO_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("ROLO_COMMIT_DATE");
    const IS_RELEASE: &str = env!("ROLO_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "rolo", bin_name = "rolo", version = get_version())]
#[command(
    about = "Contacts, notes and birthday reminders for the terminal",
    long_about = "Contacts, notes and birthday reminders for the terminal.\n\n\
                  Without a subcommand rolo starts an interactive menu."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $ROLO_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one contacts operation (e.g. `rolo contacts add alice friend`)
    Contacts {
        /// Operation verb, e.g. add, search, show-birthdays
        verb: String,
        /// Operation arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run one notes operation (e.g. `rolo notes add buy milk`)
    Notes {
        /// Operation verb, e.g. add, show-all, sort-tags
        verb: String,
        /// Operation arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
