//! `skel config`: inspect configuration values.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::active_path(config_file).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Strings print bare, everything else in TOML syntax.
fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(table) => toml::to_string_pretty(table)
            .unwrap_or_else(|_| value.to_string())
            .trim_end()
            .to_string(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_print_without_quotes() {
        let cfg = AppConfig::default();
        assert_eq!(display_value(&cfg.get("layout.spec_dir").unwrap()), "spec");
        assert_eq!(display_value(&cfg.get("generation.max_attempts").unwrap()), "3");
        assert_eq!(display_value(&cfg.get("generation.overwrite").unwrap()), "false");
    }

    #[test]
    fn tables_print_as_toml() {
        let cfg = AppConfig::default();
        let shown = display_value(&cfg.get("layout").unwrap());
        assert!(shown.contains("source_dir = \"src\""));
    }
}
