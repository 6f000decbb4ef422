//! Config command - read and write configuration keys

use crate::{
    DogeError,
    cli::{ConfigCommands, parse_setting},
    config::{DogeConfig, KEYS},
};

type Result<T> = std::result::Result<T, DogeError>;

/// Execute a config subcommand
///
/// # Errors
/// Returns `DogeError::InvalidInput` for a malformed setting or unknown key,
/// or `DogeError::ConfigError` if the value is invalid or cannot be saved.
pub fn execute(mut config: DogeConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).ok_or_else(|| {
                DogeError::InvalidInput(format!("Invalid format: '{setting}'. Expected KEY=VALUE"))
            })?;

            config.set(key, value)?;
            config.save()?;

            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Get { key } => {
            let value = config.get(key).ok_or_else(|| {
                DogeError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    KEYS.join(", ")
                ))
            })?;
            println!("{value}");
        }
    }
    Ok(())
}
