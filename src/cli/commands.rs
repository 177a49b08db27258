//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyblok story loader CLI
#[derive(Parser, Debug)]
#[command(name = "storyblok-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Loader configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Access token, overrides the one in the config file
    #[arg(long, env = "STORYBLOK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Read draft content instead of published
    #[arg(long, global = true)]
    pub draft: bool,

    /// Only load stories of this content type
    #[arg(long, global = true)]
    pub content_type: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every story and print the normalized records
    Load {
        /// Write the records to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail with a non-zero exit code instead of printing an empty list
        #[arg(long)]
        strict: bool,
    },

    /// Test the access token against the CDN API
    Check,

    /// Show the listing request parameters for a page
    Query {
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
