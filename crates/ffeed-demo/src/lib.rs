#![forbid(unsafe_code)]

//! Scripted FrankenFeed scenarios.
//!
//! Each subcommand walks one story against a seeded in-memory store behind
//! a simulated link and prints the transcript: the loaded feed, the
//! confirmation modal, the toasts, and the feed again after the dust
//! settles.

pub mod cli;
pub mod error;
pub mod scenario;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{DemoError, Result};
