//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fotogear_core::FilterMode;
use fotogear_store::BackendKind;

/// Packing list for photography equipment.
#[derive(Debug, Parser)]
#[command(name = "fotogear", version, about)]
pub struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend to use for this invocation (embedded | remote)
    #[arg(long, global = true, value_name = "KIND")]
    pub backend: Option<BackendKind>,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List equipment
    List {
        /// all | packed | unpacked
        #[arg(short, long, default_value = "all")]
        filter: FilterMode,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a piece of equipment with its photo
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Photo file (jpg, png, gif, webp, heic)
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,
    },

    /// Flip the packed flag of a record
    Toggle { id: String },

    /// Delete a record
    Delete { id: String },

    /// Show packing progress
    Progress,

    /// Sign in to the remote backend
    Login {
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long, env = "FOTOGEAR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved remote session
    Logout,

    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Default log directive for the `-v` count.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "fotogear=warn",
            1 => "fotogear=info",
            _ => "fotogear=debug,sqlx=warn",
        }
    }
}
