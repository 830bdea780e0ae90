//! Wallet provider boundary.
//!
//! The session never talks to a blockchain itself. Everything it needs
//! (account authorization, chain identification, balance reads, reverse ENS
//! lookup, change notifications) goes through [`WalletProvider`], a narrow
//! trait the embedder implements over whatever injected provider object the
//! host environment exposes, such as a browser extension bridge or a test
//! double.

mod mock;

pub use mock::{MockCalls, MockProvider};

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::ProviderResult;

/// Result of probing for a compatible wallet provider.
///
/// Replaces duck-typed marker-flag inspection: an implementation reports
/// whether a usable provider is actually present behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// A compatible provider is present and can serve requests.
    Supported,
    /// No compatible provider is available; connect attempts must fail.
    Unsupported,
}

impl Capability {
    /// Whether a compatible provider is present.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Supported)
    }
}

/// Externally fired wallet notification.
///
/// Providers push these when the user switches accounts or chains in the
/// wallet UI; the session reacts via its event handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The set of authorized accounts changed. An empty list means the
    /// wallet revoked authorization entirely.
    AccountsChanged(Vec<Address>),
    /// The active chain changed.
    ChainChanged(u64),
}

/// External wallet provider consumed by the session.
///
/// All methods are single-attempt: the session never retries, and calls
/// that require user approval suspend until the wallet UI responds.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Probe whether a compatible provider is present.
    fn capability(&self) -> Capability;

    /// Ask the provider to (re-)prompt for account permissions.
    ///
    /// Best-effort: providers without explicit permission support report
    /// [`ProviderError::Unsupported`](crate::error::ProviderError), which
    /// the connect flow treats as a soft failure.
    async fn request_permissions(&self) -> ProviderResult<()>;

    /// Request the authorized accounts, prompting the user if needed.
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Identify the active chain.
    async fn chain_id(&self) -> ProviderResult<u64>;

    /// Native balance of `address` in base units (wei).
    async fn native_balance(&self, address: Address) -> ProviderResult<U256>;

    /// ERC-20 `balanceOf(owner)` on the `token` contract, in base units.
    async fn token_balance(&self, token: Address, owner: Address) -> ProviderResult<U256>;

    /// Reverse-resolve `address` to a name, if one is registered.
    async fn lookup_name(&self, address: Address) -> ProviderResult<Option<String>>;

    /// Subscribe to account and chain change notifications.
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}
