//! Capability negotiation.
//!
//! Adapters answer every optional operation with a [`Support`] value. The
//! facade hands that value to a [`Negotiator`], which either unwraps it or,
//! when the adapter lacks the capability, raises
//! [`BridgeError::MethodUnsupported`] or returns the type's benign default
//! depending on the [`NegotiationPolicy`] fixed at connect time.

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of an adapter operation that may not be implemented.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Support<T> {
    /// The adapter performed the operation.
    Available(T),
    /// The bound plugin has no equivalent of this operation.
    Unsupported,
}

impl<T> Support<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Support::Available(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Support<U> {
        match self {
            Support::Available(v) => Support::Available(f(v)),
            Support::Unsupported => Support::Unsupported,
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Support<U>>(self, f: F) -> Support<U> {
        match self {
            Support::Available(v) => f(v),
            Support::Unsupported => Support::Unsupported,
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Support::Available(v) => Some(v),
            Support::Unsupported => None,
        }
    }
}

impl<T> From<T> for Support<T> {
    fn from(value: T) -> Self {
        Support::Available(value)
    }
}

/// Process-wide choice between raising and defaulting on unsupported calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationPolicy {
    pub suppress_exceptions: bool,
}

impl NegotiationPolicy {
    pub fn strict() -> Self {
        Self {
            suppress_exceptions: false,
        }
    }

    pub fn lenient() -> Self {
        Self {
            suppress_exceptions: true,
        }
    }
}

/// Applies a [`NegotiationPolicy`] on behalf of one bound provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiator {
    provider_id: String,
    policy: NegotiationPolicy,
}

impl Negotiator {
    pub fn new(provider_id: impl Into<String>, policy: NegotiationPolicy) -> Self {
        Self {
            provider_id: provider_id.into(),
            policy,
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn policy(&self) -> NegotiationPolicy {
        self.policy
    }

    /// Resolve an adapter answer for `method`.
    ///
    /// Evaluated on every call; two operations on the same adapter may differ
    /// in support.
    pub fn settle<T: Default>(&self, method: &'static str, support: Support<T>) -> Result<T> {
        match support {
            Support::Available(value) => Ok(value),
            Support::Unsupported if self.policy.suppress_exceptions => {
                debug!(
                    provider = %self.provider_id,
                    method,
                    "unsupported operation suppressed, returning default"
                );
                Ok(T::default())
            }
            Support::Unsupported => Err(self.unsupported(method)),
        }
    }

    /// Like [`settle`](Self::settle) for fallible adapter operations.
    pub fn settle_result<T: Default, E: Into<BridgeError>>(
        &self,
        method: &'static str,
        outcome: std::result::Result<Support<T>, E>,
    ) -> Result<T> {
        self.settle(method, outcome.map_err(Into::into)?)
    }

    pub fn unsupported(&self, method: &str) -> BridgeError {
        BridgeError::MethodUnsupported {
            provider: self.provider_id.clone(),
            method: method.to_string(),
        }
    }
}
