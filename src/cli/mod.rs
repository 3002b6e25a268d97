//! CLI module for prepdeck.
//!
//! Argument parsing for the prepdeck binary. Command dispatch lives in
//! `main.rs`; this module only decides what was asked for.

pub mod args;

pub use args::{parse_args, CliCommand};
