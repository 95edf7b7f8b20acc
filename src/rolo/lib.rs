//! # Rolo Architecture
//!
//! Rolo is a personal directory: contacts with phones, emails, an address,
//! tags and a birthday, plus a notebook of tagged free-text notes, plus a
//! reminder engine that answers "whose birthday do I greet in the next N
//! days?". The library holds all of it; the `rolo` binary is one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menu loop, one-shot subcommands, colors and tables       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Dispatch (dispatch.rs)                │
//! │  - (target, verb, args) → typed Invocation                  │
//! │  - Unknown verbs and bad arguments become rejected results  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per operation, returns CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stores (directory.rs, notebook.rs) + reminder.rs           │
//! │  - Own the records, validate before mutating                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SnapshotStore trait: load everything, save everything    │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Positions
//!
//! Notes are addressed by their 1-based position in the notebook. Positions
//! are computed when listing and shift after a delete; each note also carries
//! a UUID that never changes. See `index.rs`.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr or exits the process.
//! Logging goes through `tracing`; the binary decides where it ends up.
//!
//! ## Module Overview
//!
//! - `api`: facade generic over the snapshot store
//! - `dispatch`: verb tables, argument binding, execution
//! - `commands`: per-operation logic and `CmdResult`
//! - `session`: in-memory state of one run
//! - `directory`, `notebook`: the two stores
//! - `reminder`: birthday greeting dates
//! - `model`, `index`: records and positions
//! - `validation`: phones, emails, birthdays, tag names
//! - `store`: persistence
//! - `config`, `init`: settings and startup wiring
//! - `error`: `RoloError` and `Result`

pub mod api;
pub mod commands;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod notebook;
pub mod reminder;
pub mod session;
pub mod store;
pub mod validation;
