//! Settings commands.

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::GearError;
use crate::output::to_json;

/// Run a config subcommand against the config file under `paths`.
///
/// # Errors
///
/// Returns `GearError::Config` if the file cannot be read or written.
pub fn config(
    paths: &Paths,
    command: ConfigCommands,
    format: OutputFormat,
) -> Result<String, GearError> {
    let mut config = Config::load_from_path(&paths.config_file)?;

    match command {
        ConfigCommands::Show => show(paths, &config, format),
        ConfigCommands::SetEndpoint { url } => {
            let url = url.trim().to_string();
            if url.is_empty() {
                return Err(GearError::Validation("Endpoint must not be empty".to_string()));
            }
            config.sync.endpoint = Some(url.clone());
            config.save_to_path(&paths.config_file)?;
            Ok(format!("Sync endpoint set to {}", url.green()))
        },
        ConfigCommands::ClearEndpoint => {
            config.sync.endpoint = None;
            config.save_to_path(&paths.config_file)?;
            Ok("Sync endpoint cleared".to_string())
        },
    }
}

fn show(paths: &Paths, config: &Config, format: OutputFormat) -> Result<String, GearError> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Pretty => {
            let yaml = serde_yaml::to_string(config)
                .map_err(|e| GearError::Config(format!("Failed to serialize config: {e}")))?;
            Ok(format!(
                "{}\n{}",
                format!("# {}", paths.config_file.display()).dimmed(),
                yaml.trim_end()
            ))
        },
    }
}
