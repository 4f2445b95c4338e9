//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use canopy_core::config::{parse_server_url, CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "canopy.toml";

/// Resolve defaults, file, environment and CLI flags in precedence order.
///
/// An explicit `--config` path must exist; the default file is optional.
pub fn load_config(explicit: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(explicit) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

/// Build CLI overrides from the global flags
pub fn cli_overrides(server: Option<&str>, confidence: Option<f64>) -> Result<CliConfigOverrides> {
    let server_url = server
        .map(parse_server_url)
        .transpose()
        .context("Invalid --server value")?;

    Ok(CliConfigOverrides {
        server_url,
        confidence,
    })
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}
