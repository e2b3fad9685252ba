//! Configuration loading and parsing.
//!
//! Reads `lattice.toml` (or an override path provided by the binary). Every
//! field has a default and unknown fields are ignored, so a partial file is
//! always valid. A file that fails to parse is reported on the `config`
//! target and replaced by defaults.
//!
//! Frame margins are stored as written and clamped against the current
//! terminal size in [`Config::apply_context`] on every resize.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "lattice.toml";

/// Terminal geometry the configuration is applied against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_rows: u16,
    pub viewport_columns: u16,
}

impl ConfigContext {
    pub fn new(viewport_rows: u16, viewport_columns: u16) -> Self {
        Self {
            viewport_rows,
            viewport_columns,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_event_limit")]
    pub event_limit: usize,
    #[serde(default = "HistoryConfig::default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            event_limit: Self::default_event_limit(),
            debounce_ms: Self::default_debounce_ms(),
        }
    }
}

impl HistoryConfig {
    const fn default_event_limit() -> usize {
        200
    }
    const fn default_debounce_ms() -> u64 {
        1000
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    #[serde(default = "FrameConfig::default_margin_rows")]
    pub margin_rows: u16,
    #[serde(default = "FrameConfig::default_margin_cols")]
    pub margin_cols: u16,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            margin_rows: Self::default_margin_rows(),
            margin_cols: Self::default_margin_cols(),
        }
    }
}

impl FrameConfig {
    const fn default_margin_rows() -> u16 {
        5
    }
    const fn default_margin_cols() -> u16 {
        10
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    #[serde(default = "RuntimeConfig::default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_ms: Self::default_tick_ms(),
        }
    }
}

impl RuntimeConfig {
    const fn default_tick_ms() -> u64 {
        16
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file, or defaults.
    pub file: ConfigFile,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lattice").join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config { file }),
        Err(err) => {
            warn!(target: "config", path = %path.display(), error = %err, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp the frame margins so the inner frame keeps at least one row and
    /// one column. Returns the effective margins.
    pub fn apply_context(&self, ctx: ConfigContext) -> FrameConfig {
        let raw = self.file.frame;
        let clamped = FrameConfig {
            margin_rows: raw.margin_rows.min(ctx.viewport_rows.saturating_sub(1)),
            margin_cols: raw.margin_cols.min(ctx.viewport_columns.saturating_sub(1)),
        };
        if clamped != raw {
            info!(
                target: "config",
                raw_rows = raw.margin_rows,
                raw_cols = raw.margin_cols,
                rows = clamped.margin_rows,
                cols = clamped.margin_cols,
                viewport_rows = ctx.viewport_rows,
                viewport_columns = ctx.viewport_columns,
                "frame_margin_clamped"
            );
        }
        clamped
    }
}
