//! Configuration file loading with precedence handling.

use crate::config::keybindings::{KeyBindings, KeySpec};
use crate::paginator::{LoadPacing, PageSize, PaginationMode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but its value is not allowed.
    #[error("Invalid value for {setting} (from {origin}): {reason}")]
    InvalidValue {
        /// Setting name.
        setting: &'static str,
        /// Where the value came from (file path or env var name).
        origin: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cdir/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Items per page / per load-more step.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Use infinite scroll instead of numbered pages.
    #[serde(default)]
    pub infinite_scroll: Option<bool>,

    /// Delay before a load-more completes, in milliseconds.
    #[serde(default)]
    pub load_delay_ms: Option<u64>,

    /// Minimum interval between accepted load-more requests, in milliseconds.
    #[serde(default)]
    pub load_throttle_ms: Option<u64>,

    /// Display name used for new comments.
    #[serde(default)]
    pub author: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Key overrides: action name to one key or a list of keys.
    #[serde(default)]
    pub keybindings: Option<BTreeMap<String, KeySpec>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Default key map with `[keybindings]` overrides applied.
    pub key_bindings: KeyBindings,
    /// Items per page.
    pub page_size: PageSize,
    /// Infinite scroll enabled.
    pub infinite_scroll: bool,
    /// Load-more completion delay (ms).
    pub load_delay_ms: u64,
    /// Load-more throttle interval (ms).
    pub load_throttle_ms: u64,
    /// Comment author name.
    pub author: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Navigation mode implied by `infinite_scroll`.
    pub fn pagination_mode(&self) -> PaginationMode {
        PaginationMode::from_infinite_flag(self.infinite_scroll)
    }

    /// Load pacing implied by the delay/throttle settings.
    pub fn pacing(&self) -> LoadPacing {
        LoadPacing::from_millis(self.load_delay_ms, self.load_throttle_ms)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            page_size: PageSize::DEFAULT,
            infinite_scroll: false,
            load_delay_ms: 200,
            load_throttle_ms: 500,
            author: "anonymous".to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cdir/cdir.log` on Unix-like systems,
/// or the current directory if no state directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cdir").join("cdir.log")
    } else {
        PathBuf::from("cdir.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cdir/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cdir").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CDIR_CONFIG` environment variable
/// 3. Default path `~/.config/cdir/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("CDIR_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a zero page size or a
/// `[keybindings]` entry naming an unknown action or key.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let page_size = match config.page_size {
        Some(raw) => parse_page_size(raw, "config file")?,
        None => defaults.page_size,
    };

    let key_bindings = match &config.keybindings {
        Some(overrides) => defaults.key_bindings.with_overrides(overrides).map_err(|e| {
            ConfigError::InvalidValue {
                setting: "keybindings",
                origin: "config file".to_string(),
                reason: e.to_string(),
            }
        })?,
        None => defaults.key_bindings,
    };

    Ok(ResolvedConfig {
        key_bindings,
        page_size,
        infinite_scroll: config.infinite_scroll.unwrap_or(defaults.infinite_scroll),
        load_delay_ms: config.load_delay_ms.unwrap_or(defaults.load_delay_ms),
        load_throttle_ms: config.load_throttle_ms.unwrap_or(defaults.load_throttle_ms),
        author: config
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(defaults.author),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CDIR_PAGE_SIZE`: positive integer
/// - `CDIR_INFINITE_SCROLL`: `true`/`false`/`1`/`0`
/// - `CDIR_AUTHOR`: comment author name
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when a variable is set but unparseable.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var("CDIR_PAGE_SIZE") {
        let parsed = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidValue {
                setting: "page_size",
                origin: "CDIR_PAGE_SIZE".to_string(),
                reason: e.to_string(),
            })?;
        config.page_size = parse_page_size(parsed, "CDIR_PAGE_SIZE")?;
    }

    if let Ok(raw) = std::env::var("CDIR_INFINITE_SCROLL") {
        config.infinite_scroll = match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(ConfigError::InvalidValue {
                    setting: "infinite_scroll",
                    origin: "CDIR_INFINITE_SCROLL".to_string(),
                    reason: format!("expected a boolean, got '{other}'"),
                })
            }
        };
    }

    if let Ok(author) = std::env::var("CDIR_AUTHOR") {
        if !author.trim().is_empty() {
            config.author = author;
        }
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<PageSize>,
    infinite_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if let Some(infinite) = infinite_override {
        config.infinite_scroll = infinite;
    }

    config
}

fn parse_page_size(raw: usize, origin: &str) -> Result<PageSize, ConfigError> {
    PageSize::new(raw).map_err(|e| ConfigError::InvalidValue {
        setting: "page_size",
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
