//! Configuration loading
//!
//! Layers, lowest to highest precedence: built-in defaults, an optional
//! config file (`repo-baseline.toml` or `.repo-baseline.yml`), then
//! `REPO_BASELINE_*` environment variables. CLI flags are applied on top
//! with [`merge_cli_with_config`].

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::Config;

pub const CONFIG_FILE_NAMES: [&str; 4] =
    ["repo-baseline.toml", ".repo-baseline.toml", "repo-baseline.yml", ".repo-baseline.yml"];

pub const ENV_PREFIX: &str = "REPO_BASELINE_";

/// First known config file name that exists in `dir`.
pub fn discover_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

/// Load configuration anchored at `dir`, or from `explicit` when given.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let file = match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => discover_config_file(dir),
    };

    // Missing keys fall back to the serde defaults on `Config`.
    let mut figment = Figment::new();
    if let Some(path) = &file {
        debug!("Loading config from {}", path.display());
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml") | Some("yaml")
        );
        figment = if is_yaml {
            figment.merge(Yaml::file(path))
        } else {
            figment.merge(Toml::file(path))
        };
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX));

    figment.extract().with_context(|| match &file {
        Some(path) => format!("Invalid configuration in {}", path.display()),
        None => "Invalid configuration in environment".to_string(),
    })
}
