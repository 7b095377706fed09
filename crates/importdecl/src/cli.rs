//! Command-line arguments.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "importdecl",
    version,
    about = "Check, resolve, and plan imported-type declarations"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Emit JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit JSON Lines
    #[arg(long, global = true)]
    pub jsonl: bool,

    /// Human-friendly output
    #[arg(long, global = true, conflicts_with = "compact")]
    pub pretty: bool,

    /// Plain output, even on a terminal
    #[arg(long, global = true)]
    pub compact: bool,

    /// Config file (default: .importdecl/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Extra manifest file or directory (repeatable)
    #[arg(short, long = "manifest", global = true)]
    pub manifests: Vec<PathBuf>,

    /// Skip the built-in Feeds declarations
    #[arg(long, global = true)]
    pub no_builtin: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load every manifest and report all invalid declarations
    Check,

    /// List registered declarations
    List,

    /// Show one declaration, by qualified or projected name
    Resolve { name: String },

    /// Numeric encoding of a member, or the OR of several flags
    Encode {
        name: String,
        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Emission plans for the given symbols
    Plan {
        #[arg(required = true)]
        names: Vec<String>,
    },
}
