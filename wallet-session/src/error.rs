//! Error types for the wallet session.
//!
//! Two layers: [`ProviderError`] is what the external wallet provider
//! boundary reports, [`SessionError`] is what a connect attempt surfaces
//! to the session. Balance and ENS lookups never produce a session error;
//! their provider failures are logged and swallowed at the call site.

/// Error reported by the external wallet provider boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider does not implement the requested method.
    #[error("method not supported: {0}")]
    Unsupported(String),

    /// The user or the provider denied the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Any other provider failure.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Create an unsupported-method error.
    #[inline]
    pub fn unsupported(method: impl Into<String>) -> Self {
        Self::Unsupported(method.into())
    }

    /// Create a rejection error.
    #[inline]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Create a generic provider error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result type for provider boundary operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Error surfaced by a failed connect attempt.
///
/// Rendered with `to_string()` into the session state's `error` field;
/// the session keeps only the human-readable message, the caller gets the
/// typed value.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// No compatible wallet extension was detected.
    #[error("no compatible wallet provider detected; install a browser wallet extension to continue")]
    ProviderNotFound,

    /// The provider returned zero authorized accounts.
    #[error("the wallet returned no accounts; create or unlock an account and try again")]
    NoAccounts,

    /// The provider failed during the connect sequence.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
