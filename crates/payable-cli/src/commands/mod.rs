//! CLI subcommands.

pub mod config;
pub mod convert;
pub mod run;

use std::path::{Path, PathBuf};

use tracing::debug;

use payable_core::PayableConfig;

/// Location of the user-level config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("payable")
        .join("config.json")
}

/// Build the effective configuration: defaults, then the config file, then
/// environment overrides.
///
/// An explicit `config_path` must exist; the default path is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PayableConfig> {
    let mut config = match config_path {
        Some(path) => PayableConfig::from_file(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                PayableConfig::from_file(&path)?
            } else {
                PayableConfig::default()
            }
        }
    };

    config.apply_env();
    Ok(config)
}
