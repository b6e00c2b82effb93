//! Configuration file loading with precedence handling.

use crate::state::MatchMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TYPEAHEAD_CONFIG";
/// Environment override for the match mode.
pub const MODE_ENV: &str = "TYPEAHEAD_MODE";
/// Environment override for case-sensitive matching.
pub const CASE_SENSITIVE_ENV: &str = "TYPEAHEAD_CASE_SENSITIVE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A `[keybindings]` entry names an unknown action or an unparsable key.
    #[error("Invalid key binding {action} = {spec:?}: {reason}")]
    InvalidKeyBinding {
        /// Action name as written in the config.
        action: String,
        /// Key spec as written in the config.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/typeahead/config.toml`:
///
/// ```toml
/// mode = "substring"
/// case_sensitive = false
/// max_height = 15
/// border = true
/// label = "Fruit"
///
/// [keybindings]
/// next_match = "ctrl-j"
/// prev_match = "ctrl-k"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Match mode for type-ahead sessions.
    #[serde(default)]
    pub mode: Option<MatchMode>,

    /// Case-sensitive matching.
    #[serde(default)]
    pub case_sensitive: Option<bool>,

    /// Maximum number of popup rows.
    #[serde(default)]
    pub max_height: Option<usize>,

    /// Draw a border around the popup.
    #[serde(default)]
    pub border: Option<bool>,

    /// Caption shown before the selected label.
    #[serde(default)]
    pub label: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Extra key bindings: action name to key spec.
    #[serde(default)]
    pub keybindings: Option<HashMap<String, String>>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Match mode for type-ahead sessions.
    pub mode: MatchMode,
    /// Case-sensitive matching.
    pub case_sensitive: bool,
    /// Maximum number of popup rows (at least 1).
    pub max_height: usize,
    /// Popup border.
    pub border: bool,
    /// Caption shown before the selected label.
    pub label: Option<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Extra key bindings: action name to key spec.
    pub keybindings: HashMap<String, String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Prefix,
            case_sensitive: false,
            max_height: 10,
            border: true,
            label: None,
            log_file_path: default_log_path(),
            keybindings: HashMap::new(),
        }
    }
}

/// Values set explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--mode`
    pub mode: Option<MatchMode>,
    /// `--case-sensitive`
    pub case_sensitive: Option<bool>,
    /// `--max-height`
    pub max_height: Option<usize>,
    /// `--label`
    pub label: Option<String>,
}

/// An environment override that was set but could not be used.
///
/// Config resolves before logging starts, so these are handed back to the
/// caller to report once a subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    /// Environment variable name.
    pub variable: &'static str,
    /// Its raw value.
    pub value: String,
    /// Why it was ignored.
    pub reason: String,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/typeahead/typeahead.log` on Linux, the platform
/// state directory elsewhere, or `typeahead.log` in the current directory
/// when there is none.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("typeahead").join("typeahead.log"),
        None => PathBuf::from("typeahead.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (use defaults).
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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

/// Resolve default config file path: `<config_dir>/typeahead/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("typeahead").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TYPEAHEAD_CONFIG` environment variable
/// 3. Default path
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()))
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        mode: config.mode.unwrap_or(defaults.mode),
        case_sensitive: config.case_sensitive.unwrap_or(defaults.case_sensitive),
        max_height: config.max_height.unwrap_or(defaults.max_height).max(1),
        border: config.border.unwrap_or(defaults.border),
        label: config.label.or(defaults.label),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `TYPEAHEAD_MODE` (`prefix`|`substring`) and
/// `TYPEAHEAD_CASE_SENSITIVE` (`1`/`true`/`yes` or `0`/`false`/`no`).
/// Unparsable values leave the config unchanged and are returned.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> (ResolvedConfig, Vec<RejectedOverride>) {
    let mut rejected = Vec::new();

    if let Ok(raw) = std::env::var(MODE_ENV) {
        match raw.parse::<MatchMode>() {
            Ok(mode) => config.mode = mode,
            Err(e) => rejected.push(RejectedOverride {
                variable: MODE_ENV,
                value: raw,
                reason: e.to_string(),
            }),
        }
    }

    if let Ok(raw) = std::env::var(CASE_SENSITIVE_ENV) {
        match parse_flag(&raw) {
            Some(flag) => config.case_sensitive = flag,
            None => rejected.push(RejectedOverride {
                variable: CASE_SENSITIVE_ENV,
                value: raw,
                reason: "expected 1/true/yes/on or 0/false/no/off".to_string(),
            }),
        }
    }

    (config, rejected)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed override anything.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(case_sensitive) = cli.case_sensitive {
        config.case_sensitive = case_sensitive;
    }
    if let Some(max_height) = cli.max_height {
        config.max_height = max_height.max(1);
    }
    if let Some(label) = cli.label {
        config.label = Some(label);
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
