//! `ebpack config` - inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, CONFIG_KEYS},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.emit(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.emit_json(&config)?;
            } else {
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.header("Current Configuration:")?;
                output.emit(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.emit(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!(
            "Unknown config key: '{key}' (known: {})",
            CONFIG_KEYS.join(", ")
        ),
        source: None,
    })
}
