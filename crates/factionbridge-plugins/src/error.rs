//! Error types for reading the installed-plugin directory.

use thiserror::Error;

/// Errors that can occur while reading plugin manifests.
#[derive(Error, Debug)]
pub enum PluginError {
    /// No plugin manifest at the specified path.
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    /// Manifest parsed but failed validation.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for plugin directory operations.
pub type PluginResult<T> = std::result::Result<T, PluginError>;
