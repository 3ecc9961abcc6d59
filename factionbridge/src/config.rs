//! Configuration file loading and management
//!
//! This module handles loading and parsing the bridge configuration from
//! `$XDG_CONFIG_HOME/factionbridge/config.toml`. If the configuration file
//! doesn't exist, a default configuration is created with documented comments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main bridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    /// Connect behaviour
    #[serde(default)]
    pub bridge: BridgeSection,
    /// Where installed plugins are read from
    #[serde(default)]
    pub plugins: PluginsSection,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Defaults for `Bridge::connect`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeSection {
    /// Treat a missing owner or a repeated connect as an error rather than a
    /// warning
    /// Default: true
    #[serde(default = "default_true")]
    pub requires_factions: bool,
    /// Return benign defaults instead of `MethodUnsupported`
    /// Default: false
    #[serde(default)]
    pub suppress_exceptions: bool,
    /// Log the resolution summary at info instead of debug
    /// Default: false
    #[serde(default)]
    pub console_output: bool,
    /// Provider id or shorthand to bind regardless of fingerprints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_provider: Option<String>,
}

/// Installed-plugin directory configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PluginsSection {
    /// Folder holding one sub-folder per installed plugin
    /// If None, uses XDG_DATA_HOME/factionbridge/plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error)
    /// Default: "info"
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            requires_factions: true,
            suppress_exceptions: false,
            console_output: false,
            forced_provider: None,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from the specified path
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// The parsed configuration or an error if loading/parsing fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: BridgeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default XDG config location
    ///
    /// If the configuration file doesn't exist, creates a default configuration
    /// file with documented comments.
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_file(&config_path)?;
        }

        Self::load(&config_path)
    }

    /// Get the default configuration file path
    ///
    /// Returns `$XDG_CONFIG_HOME/factionbridge/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "raibid-labs", "factionbridge")
            .context("Failed to determine project directories")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Create a default configuration file with documented comments
    pub fn create_default_file(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

        tracing::info!("Created default configuration file at: {}", path.display());
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r#"# Faction Bridge Configuration

[bridge]
# Fail on a missing owner plugin or a repeated connect. When false these
# are only logged.
# Default: true
requires_factions = true

# Return 0 / false / empty / nothing for operations the installed plugin
# cannot perform, instead of failing with MethodUnsupported.
# Default: false
suppress_exceptions = false

# Log which plugin was bound at info level.
# Default: false
console_output = false

# Bind this provider whenever its plugin is installed, skipping the author
# check. Accepts the full id or its shorthand.
# forced_provider = "FactionsUUID"

[plugins]
# Folder containing one sub-folder per installed plugin, each with a
# plugin.toml manifest.
# If not specified, defaults to $XDG_DATA_HOME/factionbridge/plugins
# dir = "/path/to/plugins"

[logging]
# Log level: trace, debug, info, warn, error
# Default: "info"
level = "info"
"#
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid logging.level: {}. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            );
        }

        if let Some(forced) = &self.bridge.forced_provider {
            if forced.trim().is_empty() {
                anyhow::bail!("bridge.forced_provider cannot be empty");
            }
            if forced.chars().any(char::is_whitespace) {
                anyhow::bail!(
                    "Invalid bridge.forced_provider: '{}'. Provider ids contain no whitespace",
                    forced
                );
            }
        }

        Ok(())
    }

    /// Get the plugins directory
    ///
    /// Returns the configured directory or the default XDG data directory path
    pub fn plugins_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.plugins.dir {
            return Ok(dir.clone());
        }

        factionbridge_plugins::default_plugins_dir()
            .context("Failed to determine project directories")
    }
}
