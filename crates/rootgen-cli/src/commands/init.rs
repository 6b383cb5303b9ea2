//! `rootgen init` — create a default configuration file.

use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILENAME},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default rootgen configuration file.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILENAME)
    } else {
        AppConfig::config_path()
    };

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = default_config_toml()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    info!(path = %config_path.display(), "Configuration written");
    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

/// The built-in defaults rendered as TOML.
fn default_config_toml() -> CliResult<String> {
    toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_has_every_section() {
        let text = default_config_toml().unwrap();
        assert!(text.contains("[project]"));
        assert!(text.contains("cmd_dir = \"cmd\""));
        assert!(text.contains("[output]"));
    }
}
