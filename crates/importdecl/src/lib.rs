//! Command-line front end for imported-type declarations.
//!
//! Loads the built-in Feeds declarations and any configured manifests into a
//! fresh [`SymbolTable`](importdecl_core::SymbolTable), then answers the
//! questions a code generator asks: is it valid, what is it called, what
//! number does a member encode to, and what should be emitted.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

use cli::{Cli, Command};
use config::ImportDeclConfig;
use importdecl_output::{OutputFormat, OutputFormatter};
use std::process::ExitCode;

/// Run a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = ImportDeclConfig::load(cli.global.config.as_deref(), &cwd)?;
    let format = OutputFormat::from_cli(
        cli.global.json,
        cli.global.jsonl,
        cli.global.pretty,
        cli.global.compact,
        &config.pretty,
    );

    let loaded = commands::load(&config, &cli.global)?;

    if let Command::Check = cli.command {
        let report = commands::check::CheckReport::from_loaded(&loaded);
        report.print(&format);
        return Ok(if report.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // everything else refuses to work from a partial table
    commands::require_clean(&loaded)?;
    let table = &loaded.table;

    match &cli.command {
        Command::List => commands::list::ListReport::new(table).print(&format),
        Command::Resolve { name } => commands::resolve::run(table, name)?.print(&format),
        Command::Encode { name, members } => {
            commands::encode::run(table, name, members)?.print(&format)
        }
        Command::Plan { names } => commands::plan::run(table, names)?.print(&format),
        Command::Check => {}
    }
    Ok(ExitCode::SUCCESS)
}
