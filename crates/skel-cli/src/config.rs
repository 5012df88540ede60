//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SKEL_<SECTION>__<KEY>`, e.g.
//!    `SKEL_GENERATION__SPECS=never`
//! 3. Config file: `--config FILE`, otherwise `./.skel.toml`, otherwise the
//!    global `config.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use skel_core::domain::{
    ClassName, OverwritePolicy, ProjectLayout, SpecPolicy, read_model::DEFAULT_ENTITY_BASE_CLASS,
};
use skel_core::application::TemplateOptions;

use crate::error::{CliError, CliResult};

/// Name of the per-project configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".skel.toml";

const ENV_PREFIX: &str = "SKEL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where generated files go.
    pub layout: LayoutConfig,
    /// Generation behaviour.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub source_dir: PathBuf,
    pub spec_dir: PathBuf,
    /// Leading namespace mapped onto `source_dir`, e.g. `App`.
    pub namespace_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Replace existing files instead of failing.
    pub overwrite: bool,
    pub specs: SpecPolicy,
    /// Attempts per question before giving up.
    pub max_attempts: usize,
    /// Parent class of persistence-engine entities.
    pub entity_base_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            spec_dir: PathBuf::from("spec"),
            namespace_prefix: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            specs: SpecPolicy::Ask,
            max_attempts: 3,
            entity_base_class: Some(DEFAULT_ENTITY_BASE_CLASS.into()),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then files, then `SKEL_*` variables.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let defaults = toml::to_string(&Self::default()).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise default config: {e}"),
            source: Some(Box::new(e)),
        })?;

        Config::builder()
            .add_source(File::from_str(&defaults, FileFormat::Toml))
            .add_source(
                File::from(Self::active_path(config_file))
                    .format(FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
    }

    /// Global configuration file, `~/.config/skel/config.toml` on Linux.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to the local file when no home directory is known.
    pub fn global_path() -> PathBuf {
        directories::ProjectDirs::from("com", "skel", "skel")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    pub fn local_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// The file that wins for this invocation.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        match config_file {
            Some(path) => path.to_path_buf(),
            None if Self::local_path().exists() => Self::local_path(),
            None => Self::global_path(),
        }
    }

    // ── Conversions into core types ──────────────────────────────────────

    pub fn project_layout(&self) -> CliResult<ProjectLayout> {
        ProjectLayout::new(
            &self.layout.source_dir,
            &self.layout.spec_dir,
            self.layout.namespace_prefix.as_deref(),
        )
        .map_err(|e| CliError::ConfigError {
            message: format!("Invalid [layout] section: {e}"),
            source: Some(Box::new(e)),
        })
    }

    pub fn template_options(&self) -> CliResult<TemplateOptions> {
        let entity_base_class = self
            .generation
            .entity_base_class
            .as_deref()
            .filter(|class| !class.trim().is_empty())
            .map(ClassName::parse)
            .transpose()
            .map_err(|e| CliError::ConfigError {
                message: format!("Invalid generation.entity_base_class: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(TemplateOptions { entity_base_class })
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        if self.generation.overwrite {
            OverwritePolicy::Overwrite
        } else {
            OverwritePolicy::Fail
        }
    }

    /// Look up a dotted key such as `layout.source_dir`.
    pub fn get(&self, key: &str) -> CliResult<toml::Value> {
        let unknown = || CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        };
        let root = toml::Value::try_from(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;
        key.split('.')
            .try_fold(&root, |value, segment| value.get(segment))
            .cloned()
            .ok_or_else(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_conventional_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.layout.source_dir, PathBuf::from("src"));
        assert_eq!(cfg.layout.spec_dir, PathBuf::from("spec"));
        assert_eq!(cfg.generation.specs, SpecPolicy::Ask);
        assert_eq!(cfg.generation.max_attempts, 3);
        assert_eq!(cfg.overwrite_policy(), OverwritePolicy::Fail);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skel.toml");
        fs::write(
            &path,
            "[layout]\nnamespace_prefix = \"App\"\n\n[generation]\nspecs = \"never\"\noverwrite = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.layout.namespace_prefix.as_deref(), Some("App"));
        assert_eq!(cfg.layout.source_dir, PathBuf::from("src"));
        assert_eq!(cfg.generation.specs, SpecPolicy::Never);
        assert_eq!(cfg.overwrite_policy(), OverwritePolicy::Overwrite);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skel.toml");
        fs::write(&path, "[generation]\nspecs = \"sometimes\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("layout.source_dir").unwrap().as_str(), Some("src"));
        assert_eq!(cfg.get("generation.specs").unwrap().as_str(), Some("ask"));
        assert_eq!(
            cfg.get("output.no_color").unwrap().as_bool(),
            Some(false)
        );
        assert!(cfg.get("generation").unwrap().is_table());
    }

    #[test]
    fn get_unknown_key_is_error() {
        assert!(matches!(
            AppConfig::default().get("does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn invalid_base_class_is_a_config_error() {
        let mut cfg = AppConfig::default();
        cfg.generation.entity_base_class = Some("Not A Class".into());
        assert!(matches!(
            cfg.template_options(),
            Err(CliError::ConfigError { .. })
        ));

        cfg.generation.entity_base_class = Some(String::new());
        assert!(cfg.template_options().unwrap().entity_base_class.is_none());
    }

    #[test]
    fn layout_with_absolute_dir_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.layout.source_dir = PathBuf::from("/abs");
        assert!(cfg.project_layout().is_err());
        assert!(AppConfig::default().project_layout().is_ok());
    }

    #[test]
    fn global_path_is_not_empty() {
        assert!(!AppConfig::global_path().as_os_str().is_empty());
    }
}
