use crate::config::AppConfig;
use crate::error::CliResult;

/// Prints the effective configuration, secrets masked.
pub fn show(config: &AppConfig) -> CliResult<()> {
    print!("{}", config.to_display_toml()?);
    println!("# session file: {}", config.session_path().display());
    Ok(())
}
