//! Error types shared by the bridge and its adapters.

use thiserror::Error;

/// Errors surfaced by the bridge lifecycle and the facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A second `connect` while the bridge is already connected.
    #[error("Bridge is already connected")]
    AlreadyConnected,

    /// A required argument was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The bound adapter does not support the requested operation.
    #[error("Method '{method}' is not supported by provider '{provider}'")]
    MethodUnsupported { provider: String, method: String },

    /// A provider matched but its adapter factory failed.
    #[error("Failed to construct adapter for provider '{provider}': {reason}")]
    AdapterConstructionFailed { provider: String, reason: String },

    /// No catalog entry matched the installed plugins.
    #[error("No provider could be resolved from the installed plugins")]
    NoProviderResolved,

    /// A non-server faction with the given name already exists.
    #[error("Faction already exists: {0}")]
    AlreadyExists(String),

    /// The adapter reported a failure of its own.
    #[error("Adapter error: {0}")]
    Adapter(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors returned by adapter factories and fallible adapter operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The native plugin is present but not in a usable state.
    #[error("Plugin unavailable: {0}")]
    Unavailable(String),

    /// The native plugin rejected the operation.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// A named entity already exists in the native plugin.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A referenced entity does not exist in the native plugin.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<AdapterError> for BridgeError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::AlreadyExists(name) => BridgeError::AlreadyExists(name),
            other => BridgeError::Adapter(other.to_string()),
        }
    }
}
