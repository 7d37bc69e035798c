use crate::color::ColorMode;
use crate::error::{IssuefmtError, Result};
use crate::terminal::DEFAULT_COLUMNS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "issuefmt";

/// The filename for the configuration file.
const CONFIG_FILENAME: &str = "config.toml";

// ============================================================================
// Configuration
// ============================================================================

/// User preferences for terminal rendering.
///
/// Missing fields in a config file take their defaults, so partial configs
/// work.
///
/// # Example
///
/// ```toml
/// color = "auto"
/// spinner = true
/// default_columns = 80
/// user = "octocat"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// When to emit ANSI colors: `auto`, `always` or `never`.
    #[serde(default)]
    pub color: ColorMode,

    /// Whether to animate a throbber while loading issues.
    #[serde(default = "default_true")]
    pub spinner: bool,

    /// Width used when the terminal cannot report one.
    #[serde(default = "default_columns")]
    pub default_columns: usize,

    /// Login treated as the current user when none is given on the
    /// command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_columns() -> usize {
    DEFAULT_COLUMNS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            spinner: true,
            default_columns: DEFAULT_COLUMNS,
            user: None,
        }
    }
}

// ============================================================================
// Config Validation
// ============================================================================

use std::error::Error;
use std::fmt;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The fallback width must leave room to render anything.
    ZeroColumns,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroColumns => {
                write!(f, "`default_columns` must be greater than 0")
            }
        }
    }
}

impl Error for ConfigError {}

/// Validate a configuration for logical consistency.
///
/// # Example
///
/// ```
/// use issuefmt::config::{validate_config, Config};
///
/// assert!(validate_config(&Config::default()).is_ok());
///
/// let invalid = Config {
///     default_columns: 0,
///     ..Default::default()
/// };
/// assert!(validate_config(&invalid).is_err());
/// ```
pub fn validate_config(config: &Config) -> std::result::Result<(), ConfigError> {
    if config.default_columns == 0 {
        return Err(ConfigError::ZeroColumns);
    }
    Ok(())
}

// ============================================================================
// Config File Management
// ============================================================================

/// Default config file content with explanatory comments.
const DEFAULT_CONFIG_WITH_COMMENTS: &str = r#"# issuefmt configuration

# Color output
# - "auto": color when stdout is a terminal and NO_COLOR is unset
# - "always": always emit ANSI colors
# - "never": plain text only
color = "auto"

# Spinner: animate a throbber while issues load
spinner = true

# Width used when the terminal size cannot be determined
default_columns = 80

# Current user login, used for "you" in headers and the assigned marker
# user = "octocat"
"#;

/// Get the issuefmt config directory path (~/.config/issuefmt/).
///
/// Does not create the directory.
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| IssuefmtError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (~/.config/issuefmt/config.toml).
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Load the configuration from `~/.config/issuefmt/config.toml`, creating a
/// commented default file when none exists.
pub fn load_config() -> Result<Config> {
    load_config_at(&config_path()?)
}

/// Load the configuration from `path`, creating a commented default file
/// when none exists.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, contains invalid
/// TOML, or fails validation.
pub fn load_config_at(path: &Path) -> Result<Config> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_WITH_COMMENTS)?;
        tracing::debug!(path = %path.display(), "created default config");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        IssuefmtError::Config(format!(
            "Failed to parse config file at {:?}: {}",
            path, e
        ))
    })?;
    validate_config(&config).map_err(|e| IssuefmtError::Config(e.to_string()))?;

    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
