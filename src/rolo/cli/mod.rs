//! # CLI Layer
//!
//! One possible UI client for rolo. This is the only place that knows about
//! stdin/stdout/stderr, exit codes and colors.
//!
//! Two modes:
//! - `rolo contacts|notes <verb> [args...]` runs one operation, prints the
//!   result, saves, and exits.
//! - `rolo` alone starts the interactive menu ([`repl`]) and saves on exit.
//!
//! Either way the data directory comes from `--home`, then `ROLO_HOME`, then
//! the platform data dir.

mod messages;
mod render;
mod repl;
mod setup;

use clap::Parser;
use colored::Colorize;
use rolo::dispatch::Target;
use rolo::error::Result;
use rolo::init::{initialize, resolve_home, Recovery, RoloContext};
use setup::{Cli, Commands};
use std::io::IsTerminal;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REJECTED_EXIT_CODE: i32 = 2;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let home = resolve_home(cli.home)?;
    tracing::debug!(home = %home.display(), "using data directory");
    let mut ctx = initialize(&home)?;
    if let Some(recovery) = &ctx.recovered {
        print_recovery(recovery);
    }

    match cli.command {
        Some(Commands::Contacts { verb, args }) => one_shot(&mut ctx, Target::Contacts, &verb, &args),
        Some(Commands::Notes { verb, args }) => one_shot(&mut ctx, Target::Notes, &verb, &args),
        None => interactive(&mut ctx),
    }
}

fn one_shot(ctx: &mut RoloContext, target: Target, verb: &str, args: &[String]) -> Result<()> {
    let result = ctx.api.run(target, verb, args)?;
    if result.rejected {
        eprint!("{}", render::render_result(&result));
        std::process::exit(REJECTED_EXIT_CODE);
    }
    render::print_result(&result);
    ctx.api.save()
}

fn interactive(ctx: &mut RoloContext) -> Result<()> {
    let pause = (ctx.config.menu_pause_ms > 0 && std::io::stdout().is_terminal())
        .then(|| Duration::from_millis(ctx.config.menu_pause_ms));

    let stdin = std::io::stdin();
    let loop_result = repl::Repl::new(&mut ctx.api, std::io::stdout())
        .with_pause(pause)
        .run(stdin.lock());

    // Whatever ended the loop, keep what was entered so far.
    let saved = ctx.api.save();
    loop_result.and(saved)
}

fn print_recovery(recovery: &Recovery) {
    let notice = format!(
        "Warning: the data file could not be read ({}).\nIt was moved to {} and rolo started with an empty book.",
        recovery.reason,
        recovery.moved_to.display()
    );
    eprintln!("{}", notice.yellow());
}

/// Logs go to stderr so stdout stays clean. `RUST_LOG` overrides the default.
fn init_tracing(verbose: bool) {
    let default = if verbose { "rolo=debug" } else { "rolo=warn" };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
