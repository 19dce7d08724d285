//! # CLI Layer
//!
//! One possible client of the agenda library. It is the only place that
//! reads stdin, writes stdout/stderr, sets up logging or decides exit codes.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` and the per-command handlers
//! - `print`: tables, cards, messages and JSON output
//! - `prompt`: interactive edit and confirmation prompts

mod commands;
mod print;
mod prompt;
mod setup;

pub use commands::run;
