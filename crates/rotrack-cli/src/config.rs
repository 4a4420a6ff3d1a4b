//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level rotrack configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotrackConfig {
    /// Directory reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Output format when a command gets no `--format`.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./rotrack-reports")
}
fn default_format() -> String {
    "text".to_string()
}
fn default_log_filter() -> String {
    "rotrack=info,rotrack_core=info".to_string()
}

impl Default for RotrackConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            log_filter: default_log_filter(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `rotrack.toml` in the current directory
/// 2. `~/.config/rotrack/config.toml`
///
/// Environment variable override: `ROTRACK_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<RotrackConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("rotrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<RotrackConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RotrackConfig::default(),
    };

    if let Ok(dir) = std::env::var("ROTRACK_OUTPUT_DIR") {
        if !dir.is_empty() {
            config.output_dir = PathBuf::from(dir);
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("rotrack"))
}
