//! # fotogear-cli: Command-Line Front End
//!
//! Runs the equipment store against the configured backend and renders its
//! notifications on the terminal.
//!
//! ## Module Organization
//! ```text
//! apps/cli/src/
//! ├── main.rs      ◄─── entry point, exit codes
//! ├── lib.rs       ◄─── You are here (tracing setup, re-exports)
//! ├── cli.rs       ◄─── clap definitions
//! ├── config.rs    ◄─── config.toml + FOTOGEAR_* overrides
//! ├── app.rs       ◄─── backend selection and store construction
//! ├── session.rs   ◄─── saved remote session
//! ├── notifier.rs  ◄─── console notifications
//! ├── error.rs     ◄─── CliError, exit codes
//! └── commands/    ◄─── one function per subcommand
//! ```

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notifier;
pub mod session;

use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Command};
pub use commands::run;
pub use config::AppConfig;
pub use error::{CliError, CliResult, ErrorCode};

/// Initializes structured logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` applies
/// (see [`Cli::log_directive`]).
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
