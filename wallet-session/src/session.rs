//! Wallet session lifecycle and balance-refresh orchestration.
//!
//! [`WalletSession`] owns the connection state machine: Disconnected and
//! Connected, with a transient loading flag overlaying either while a
//! connect or switch attempt is in flight. The session is an explicitly
//! constructed object; the caller injects a [`WalletProvider`] and owns
//! the session's lifetime; there is no ambient global.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wallet_session::{MockProvider, WalletSession};
//!
//! let provider = Arc::new(MockProvider::new().with_accounts(vec![address]));
//! let session = WalletSession::new(provider);
//!
//! session.connect().await?;
//! let state = session.state();
//! println!("{} on {}", state.short_address().unwrap(), state.network.unwrap());
//! ```

use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::chains::{self, MAINNET_CHAIN_ID, NATIVE_DECIMALS};
use crate::error::{Result, SessionError};
use crate::provider::{Capability, ProviderEvent, WalletProvider};
use crate::state::{Action, SessionState, reduce};
use crate::units::format_fixed;

/// Fractional digits displayed for the native balance.
const ETH_DISPLAY_DECIMALS: usize = 4;

/// Fractional digits displayed for the DAI balance.
const DAI_DISPLAY_DECIMALS: usize = 2;

/// A wallet connection session.
///
/// Orchestrates connect/disconnect/re-connect against an injected
/// [`WalletProvider`], fetches balances and the ENS name as follow-ups,
/// and publishes every state change through a watch channel.
///
/// Concurrent operations are not mutually excluded: a user-initiated
/// connect racing an externally triggered re-connect is last-write-wins,
/// and there is no cancellation of in-flight attempts.
pub struct WalletSession {
    provider: Arc<dyn WalletProvider>,
    state: watch::Sender<SessionState>,
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl WalletSession {
    /// Create a session over the given provider, starting disconnected.
    #[must_use]
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { provider, state }
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to session state changes.
    ///
    /// The receiver observes the latest state after each transition;
    /// intermediate states may be coalesced, which is fine for re-render
    /// style consumers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn dispatch(&self, action: Action) {
        self.state.send_modify(|state| *state = reduce(state, action));
    }

    /// Connect (or re-connect) to the wallet.
    ///
    /// Requests account authorization from the provider, reads the active
    /// chain, commits the connection atomically, then refreshes balances
    /// and resolves the ENS name before returning. May be called while
    /// already connected to force re-selection; a failed re-connect leaves
    /// the prior session intact apart from the error message.
    ///
    /// # Errors
    ///
    /// [`SessionError::ProviderNotFound`] when no compatible provider is
    /// present, [`SessionError::NoAccounts`] when the wallet authorizes
    /// zero accounts, and [`SessionError::Provider`] for any other
    /// provider failure. The rendered message is also stored in the
    /// session state.
    pub async fn connect(&self) -> Result<()> {
        self.dispatch(Action::SetError(None));
        self.dispatch(Action::SetLoading(true));

        match self.try_connect().await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "wallet connect failed");
                self.dispatch(Action::SetError(Some(err.to_string())));
                Err(err)
            }
        }
    }

    async fn try_connect(&self) -> Result<()> {
        if !self.provider.capability().is_supported() {
            return Err(SessionError::ProviderNotFound);
        }

        // Best-effort: force the wallet's account-selection prompt. Providers
        // without explicit permission support fall through to the direct
        // account request below.
        if let Err(err) = self.provider.request_permissions().await {
            debug!(error = %err, "permission request declined, trying direct account access");
        }

        let accounts = self.provider.request_accounts().await?;
        let Some(address) = accounts.first().copied() else {
            return Err(SessionError::NoAccounts);
        };

        let chain_id = self.provider.chain_id().await?;
        let network = chains::network_name(chain_id);
        info!(address = %address, chain_id, network = %network, "wallet connected");

        self.dispatch(Action::SetWalletInfo {
            address,
            chain_id,
            network,
        });

        self.fetch_balances(address, chain_id).await;
        self.fetch_ens_name(address, chain_id).await;
        Ok(())
    }

    /// Reset the session to its empty initial state.
    ///
    /// Wallet providers expose no programmatic disconnect; this only
    /// clears local session state.
    pub fn disconnect(&self) {
        info!("wallet disconnected");
        self.dispatch(Action::Disconnect);
    }

    /// Re-fetch the native and DAI balances for the connected account.
    ///
    /// No-op unless an address and chain id are present. Fetch failures
    /// are logged and swallowed; previously displayed values stay put and
    /// the session error is never set from here.
    pub async fn refresh_balances(&self) {
        let Some((address, chain_id)) = self.identity() else {
            return;
        };
        self.fetch_balances(address, chain_id).await;
    }

    /// Reverse-resolve the connected address to an ENS name.
    ///
    /// Only queries the resolution facility on mainnet; on other chains
    /// the name stays unresolved. Failures are logged, never surfaced.
    pub async fn resolve_ens(&self) {
        let Some((address, chain_id)) = self.identity() else {
            return;
        };
        self.fetch_ens_name(address, chain_id).await;
    }

    /// React to an externally fired `accountsChanged` notification.
    ///
    /// An empty list means the wallet revoked authorization: the session
    /// resets. A non-empty list while connected re-runs the full connect
    /// sequence against the new primary account.
    pub async fn handle_accounts_changed(&self, accounts: &[Address]) {
        if accounts.is_empty() {
            debug!("wallet revoked all accounts");
            self.disconnect();
            return;
        }
        let connected = self.state.borrow().is_connected;
        if connected {
            debug!("accounts changed, reconnecting");
            let _ = self.connect().await;
        }
    }

    /// React to an externally fired `chainChanged` notification by
    /// re-running the full connect sequence.
    pub async fn handle_chain_changed(&self, chain_id: u64) {
        let connected = self.state.borrow().is_connected;
        if connected {
            debug!(chain_id, "chain changed, reconnecting");
            let _ = self.connect().await;
        }
    }

    /// Drive the provider's notification stream until it closes.
    ///
    /// Dispatches each notification to the matching handler. The session
    /// spawns no tasks of its own; the caller decides where this future
    /// runs.
    pub async fn run(&self) {
        let mut events = self.provider.subscribe();
        loop {
            match events.recv().await {
                Ok(ProviderEvent::AccountsChanged(accounts)) => {
                    self.handle_accounts_changed(&accounts).await;
                }
                Ok(ProviderEvent::ChainChanged(chain_id)) => {
                    self.handle_chain_changed(chain_id).await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "provider event stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    fn identity(&self) -> Option<(Address, u64)> {
        let state = self.state.borrow();
        Some((state.address?, state.chain_id?))
    }

    async fn fetch_balances(&self, address: Address, chain_id: u64) {
        debug!(address = %address, "fetching native balance");
        match self.provider.native_balance(address).await {
            Ok(wei) => match format_fixed(wei, NATIVE_DECIMALS, ETH_DISPLAY_DECIMALS) {
                Ok(formatted) => self.dispatch(Action::SetEthBalance(formatted)),
                Err(err) => warn!(error = %err, "failed to format native balance"),
            },
            Err(err) => warn!(error = %err, "failed to fetch native balance"),
        }

        let Some(contract) = chains::dai_contract(chain_id) else {
            debug!(chain_id, "no DAI contract on this chain");
            self.dispatch(Action::SetDaiBalance("0.00".to_owned()));
            return;
        };

        debug!(contract = %contract.address, "fetching DAI balance");
        match self.provider.token_balance(contract.address, address).await {
            Ok(amount) => match format_fixed(amount, contract.decimals, DAI_DISPLAY_DECIMALS) {
                Ok(formatted) => self.dispatch(Action::SetDaiBalance(formatted)),
                Err(err) => warn!(error = %err, "failed to format DAI balance"),
            },
            Err(err) => warn!(error = %err, "failed to fetch DAI balance"),
        }
    }

    async fn fetch_ens_name(&self, address: Address, chain_id: u64) {
        if chain_id != MAINNET_CHAIN_ID {
            return;
        }
        match self.provider.lookup_name(address).await {
            Ok(name) => self.dispatch(Action::SetEnsName(name)),
            Err(err) => debug!(error = %err, "ENS lookup failed"),
        }
    }
}
