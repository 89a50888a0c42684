use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use xdg::BaseDirectories;

use crate::drag::{DropZoneMetrics, DEFAULT_DEAD_ZONE, DEFAULT_SLOT_PADDING};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Store file; `None` means `<XDG data home>/bigboard/store.toml`
    pub data_file: Option<PathBuf>,
    pub use_custom_weights: bool,
    pub show_consensus_on_board: bool,
    pub candidate_limit: usize,
    pub drag: DragConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    pub slot_padding: f64,
    pub dead_zone: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            data_file: None,
            use_custom_weights: false,
            show_consensus_on_board: true,
            candidate_limit: 100,
            drag: DragConfig::default(),
        }
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            slot_padding: DEFAULT_SLOT_PADDING,
            dead_zone: DEFAULT_DEAD_ZONE,
        }
    }
}

impl DragConfig {
    /// Drop zone tuning, with unusable values replaced by the defaults
    pub fn metrics(&self) -> DropZoneMetrics {
        let usable = |value: f64, default: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                default
            }
        };
        DropZoneMetrics {
            slot_padding: usable(self.slot_padding, DEFAULT_SLOT_PADDING),
            dead_zone: usable(self.dead_zone, DEFAULT_DEAD_ZONE),
        }
    }
}

impl Config {
    /// Candidate list size, never zero
    pub fn candidate_limit(&self) -> usize {
        self.candidate_limit.max(1)
    }

    /// Where the store lives, explicit setting first
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(get_default_data_path)
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn get_default_data_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let data_home = xdg_dirs.get_data_home()?;
    Some(data_home.join("store.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    read_from(&config_path)
}

/// Read a config file, falling back to defaults if it is missing or invalid
pub fn read_from(config_path: &Path) -> Config {
    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        debug!("CONFIG: ignoring invalid {}: {}", config_path.display(), e);
        Config::default()
    })
}

/// Write the config to its XDG location, returning the path written
pub fn write(config: &Config) -> Result<PathBuf> {
    let config_path = get_config_path().context("could not determine config directory")?;
    write_to(config, &config_path)?;
    Ok(config_path)
}

pub fn write_to(config: &Config, config_path: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(config_path, content)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    debug!("CONFIG: wrote {}", config_path.display());
    Ok(())
}
