//! # Commands
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── dispatch
//! ├── equipment.rs  ◄─── list, add, toggle, delete, progress
//! ├── account.rs    ◄─── login, logout
//! └── config.rs     ◄─── config
//! ```
//!
//! Equipment commands work on a loaded [`EquipmentStore`]; the store reports
//! outcomes through the [`ConsoleNotifier`], so commands only print data.
//!
//! [`EquipmentStore`]: fotogear_store::EquipmentStore

pub mod account;
pub mod config;
pub mod equipment;

use std::sync::Arc;

use tracing::debug;

use fotogear_store::Notifier;

use crate::app::open_store;
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::notifier::ConsoleNotifier;

/// Runs one parsed invocation.
pub async fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.config.as_deref(), cli.backend)?;
    debug!(backend = %config.backend, "Configuration ready");

    let notifier: Arc<dyn Notifier> = if cli.quiet {
        Arc::new(ConsoleNotifier::quiet())
    } else {
        Arc::new(ConsoleNotifier::new())
    };

    match cli.command {
        Command::Config => config::show(&config),
        Command::Login { email, password } => account::login(&config, &email, &password).await,
        Command::Logout => account::logout(&config).await,
        command => {
            let mut store = open_store(&config, notifier).await?;
            match command {
                Command::List { filter, json } => equipment::list(&store, filter, json),
                Command::Add {
                    name,
                    description,
                    category,
                    image,
                } => {
                    let draft = equipment::draft(name, description, category);
                    equipment::add(&mut store, draft, &image).await
                }
                Command::Toggle { id } => equipment::toggle(&mut store, &id).await,
                Command::Delete { id } => equipment::delete(&mut store, &id).await,
                Command::Progress => {
                    equipment::progress(&store);
                    Ok(())
                }
                Command::Config | Command::Login { .. } | Command::Logout => Ok(()),
            }
        }
    }
}
