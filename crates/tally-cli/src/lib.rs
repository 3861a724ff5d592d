#![deny(warnings)]
//! Tally command-line front end
//!
//! The binary is a thin adapter over [`tally_core::Session`]: it loads
//! configuration, installs logging, and maps commands or REPL lines onto
//! session actions.

pub mod cli;
pub mod config;
pub mod repl;
pub mod tracing_setup;

pub use cli::{TallyCli, TallyCommand, build_session, eval_once, load_config};
pub use config::{ConfigSource, TallyConfig};
pub use repl::Repl;
