//! TOML user configuration: loading, validation, and the default config path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::context::validate_cli_name;

/// User-level settings for clia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Entrypoint name offered when `init` asks for one
    #[serde(default = "defaults::cli_name")]
    pub default_cli_name: String,
}

impl Config {
    /// Load config from file, or return defaults if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Load from CLI-provided path or default location.
    pub fn load_or_default(cli_path: Option<&Path>) -> Result<Self> {
        let path = match cli_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        Self::load(&path)
    }

    /// Validate config for common misconfigurations.
    pub fn validate(&self) -> Result<()> {
        validate_cli_name(&self.default_cli_name).context("invalid default_cli_name in config")?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_cli_name: defaults::cli_name(),
        }
    }
}

/// Default config file path: ~/.config/clia/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("could not determine home directory")?
        .join(".config")
        .join("clia")
        .join("config.toml"))
}

mod defaults {
    pub fn cli_name() -> String {
        "clia".into()
    }
}
