//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags and the project manifest (handled by `commands::generate`)
//! 2. Environment variables: `ROOTGEN__<SECTION>__<KEY>`, e.g.
//!    `ROOTGEN__PROJECT__CMD_DIR=cli`
//! 3. Config file: `--config`, else `./.rootgen.toml`, else the per-user
//!    location from [`AppConfig::config_path`]
//! 4. Built-in defaults (always present)

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the per-directory config file written by `init --local`.
pub const LOCAL_CONFIG_FILENAME: &str = ".rootgen.toml";

const ENV_PREFIX: &str = "ROOTGEN";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks for generation when neither flags nor manifest decide.
    pub project: ProjectDefaults,
    /// Import registry overrides, logical key to import path.
    pub imports: BTreeMap<String, String>,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub cmd_dir: String,
    pub global_dir: String,
    /// Used only when go.mod cannot be read.
    pub module: Option<String>,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            cmd_dir: "cmd".into(),
            global_dir: "g".into(),
            module: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
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
    /// Load configuration from the config file and the environment on top of
    /// the built-in defaults.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::active_path(), false),
        };
        Self::build(&path, required, None)
    }

    fn build(
        path: &Path,
        required: bool,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "Loading configuration");

        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env);

        let config = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(environment)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Configuration has an unexpected shape")
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.rootgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "rootgen", "rootgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILENAME))
    }

    /// The file [`AppConfig::load`] reads when no `--config` is given.
    pub fn active_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILENAME);
        if local.is_file() {
            local
        } else {
            Self::config_path()
        }
    }

    /// Look up a dotted key such as `project.cmd_dir` or `imports.cobra`.
    ///
    /// Returns `None` for unknown keys; unset optional values render as an
    /// empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&tree, |node, part| node.get(part))?;
        Some(match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
