//! # CLI Argument Definitions
//!
//! Subcommands and flags of the studio tool, declared with `clap` derive.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "atria-studio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect the Atria Renewable content schemas and validate documents")]
pub(crate) struct Cli {
    /// Studio config file (defaults to `studio.toml` when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List registered document types
    Types,
    /// Print the schema definitions as JSON
    Schema {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Validate JSON documents (a document or an array of documents per file)
    Validate {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Report hidden fields, groups and fieldsets of a document
    Visibility {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print a new document with its initial values
    New {
        /// Document type, e.g. `blog`
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Document id (a random draft id by default)
        #[arg(long)]
        id: Option<String>,
    },
    /// List configured studio workspaces
    Workspaces,
}
