//! `skel init`: create a default configuration file.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default skel configuration file.
#[instrument(skip_all)]
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = target_path(&args);
    if !write_default(&config_path, args.force)? {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    info!(path = %config_path.display(), "Configuration created");
    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

fn target_path(args: &InitArgs) -> PathBuf {
    debug!(global = args.global, local = args.local, "Selecting config location");
    if args.local {
        AppConfig::local_path()
    } else {
        AppConfig::global_path()
    }
}

/// Returns `false` when the file exists and `force` is off.
fn write_default(config_path: &Path, force: bool) -> CliResult<bool> {
    if config_path.exists() && !force {
        return Ok(false);
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    Ok(true)
}
