//! CLI module
//!
//! Command-line interface for running the loader outside a site build.
//!
//! # Commands
//!
//! - `load` - Fetch every story and print the normalized records
//! - `check` - Test the token against the CDN API
//! - `query` - Show the parameters of a listing request without sending it

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
