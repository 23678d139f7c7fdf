#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod handlers;

use crate::args::{Cli, Command};
use crate::handlers::{catalog, documents};

use anyhow::Result;
use atria::domain::config::StudioConfig;
use atria::kernel::config::{check_presence, load_config};
use atria_logger::Logger;
use clap::Parser;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _logger = Logger::builder().name(env!("CARGO_PKG_NAME")).verbosity(cli.verbose).init()?;

    let config: StudioConfig = load_config(cli.config.as_deref())?;
    check_presence(&config)?;
    let registry = atria::init(&config)?;

    match cli.command {
        Command::Types => catalog::list_types(&registry),
        Command::Schema { pretty } => catalog::dump_schema(&registry, pretty)?,
        Command::Workspaces => catalog::list_workspaces(&config),
        Command::Validate { files } => return documents::validate(&registry, &files),
        Command::Visibility { file } => documents::visibility(&registry, &file)?,
        Command::New { type_name, id } => documents::create(&registry, &type_name, id.as_deref())?,
    }

    Ok(ExitCode::SUCCESS)
}
