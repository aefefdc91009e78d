//! Contour configuration file handling
//!
//! `contour.toml` is optional. Every key has a default, and command line
//! flags win over the file.

use anyhow::{Context, Result};
use contour_svg::{LoadOptions, SurfaceSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "contour.toml";

/// Tool configuration (contour.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContourConfig {
    /// Directory relative document paths resolve against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// `EnvFilter` directive used when `--verbose` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub raster: SurfaceSettings,
}

impl ContourConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `contour.toml` in the working
    /// directory is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid contour configuration")
    }

    /// Load options, with `override_dir` taking precedence over the file
    pub fn load_options(&self, override_dir: Option<&Path>) -> LoadOptions {
        let options = LoadOptions::default();
        match override_dir.or(self.data_dir.as_deref()) {
            Some(dir) => options.with_data_dir(dir),
            None => options,
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
