//! Scriptable in-memory wallet provider.
//!
//! [`MockProvider`] backs the crate's tests and examples the same way a
//! memory-backed storage backs a persistence layer: fully scriptable
//! accounts, chain, balances and failures, plus per-method call counters
//! so a test can assert that no external call was made.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{Capability, ProviderEvent, WalletProvider};
use crate::error::{ProviderError, ProviderResult};

/// Capacity of the mock's notification channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Per-method call counters, readable via [`MockProvider::calls`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MockCalls {
    /// Calls to `request_permissions`.
    pub request_permissions: usize,
    /// Calls to `request_accounts`.
    pub request_accounts: usize,
    /// Calls to `chain_id`.
    pub chain_id: usize,
    /// Calls to `native_balance`.
    pub native_balance: usize,
    /// Calls to `token_balance`.
    pub token_balance: usize,
    /// Calls to `lookup_name`.
    pub lookup_name: usize,
}

#[derive(Debug)]
struct MockState {
    capability: Capability,
    accounts: Vec<Address>,
    chain_id: u64,
    native: HashMap<Address, U256>,
    tokens: HashMap<(Address, Address), U256>,
    names: HashMap<Address, String>,
    permissions_error: Option<ProviderError>,
    accounts_error: Option<ProviderError>,
    chain_id_error: Option<ProviderError>,
    native_error: Option<ProviderError>,
    token_error: Option<ProviderError>,
    lookup_error: Option<ProviderError>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            capability: Capability::Supported,
            accounts: Vec::new(),
            chain_id: 1,
            native: HashMap::new(),
            tokens: HashMap::new(),
            names: HashMap::new(),
            permissions_error: None,
            accounts_error: None,
            chain_id_error: None,
            native_error: None,
            token_error: None,
            lookup_error: None,
        }
    }
}

/// In-memory [`WalletProvider`] for tests and demos.
///
/// Defaults to a supported provider on mainnet with no authorized
/// accounts; configure with the `with_*` builders or reconfigure mid-test
/// with the setters. Unknown addresses read as zero balances and
/// unresolved names.
#[derive(Debug)]
pub struct MockProvider {
    state: Mutex<MockState>,
    calls: Mutex<MockCalls>,
    events: broadcast::Sender<ProviderEvent>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a mock provider with default state.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(MockState::default()),
            calls: Mutex::new(MockCalls::default()),
            events,
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state lock poisoned")
    }

    fn count(&self, bump: impl FnOnce(&mut MockCalls)) {
        bump(&mut self.calls.lock().expect("mock call counter lock poisoned"));
    }

    /// Set the capability probe result.
    #[must_use]
    pub fn with_capability(self, capability: Capability) -> Self {
        self.state().capability = capability;
        self
    }

    /// Set the authorized account list.
    #[must_use]
    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.state().accounts = accounts;
        self
    }

    /// Set the active chain id.
    #[must_use]
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.state().chain_id = chain_id;
        self
    }

    /// Set the native balance of an address, in base units.
    #[must_use]
    pub fn with_native_balance(self, address: Address, wei: U256) -> Self {
        self.state().native.insert(address, wei);
        self
    }

    /// Set a token balance for `(token, owner)`, in base units.
    #[must_use]
    pub fn with_token_balance(self, token: Address, owner: Address, amount: U256) -> Self {
        self.state().tokens.insert((token, owner), amount);
        self
    }

    /// Register a reverse-resolvable name for an address.
    #[must_use]
    pub fn with_name(self, address: Address, name: impl Into<String>) -> Self {
        self.state().names.insert(address, name.into());
        self
    }

    /// Replace the authorized account list mid-test.
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state().accounts = accounts;
    }

    /// Replace the active chain id mid-test.
    pub fn set_chain_id(&self, chain_id: u64) {
        self.state().chain_id = chain_id;
    }

    /// Replace the native balance of an address mid-test.
    pub fn set_native_balance(&self, address: Address, wei: U256) {
        self.state().native.insert(address, wei);
    }

    /// Make every `request_permissions` call fail with `error`.
    pub fn fail_permissions(&self, error: ProviderError) {
        self.state().permissions_error = Some(error);
    }

    /// Make every `request_accounts` call fail with `error`.
    pub fn fail_accounts(&self, error: ProviderError) {
        self.state().accounts_error = Some(error);
    }

    /// Make every `chain_id` call fail with `error`.
    pub fn fail_chain_id(&self, error: ProviderError) {
        self.state().chain_id_error = Some(error);
    }

    /// Make every `native_balance` call fail with `error`.
    pub fn fail_native_balance(&self, error: ProviderError) {
        self.state().native_error = Some(error);
    }

    /// Make every `token_balance` call fail with `error`.
    pub fn fail_token_balance(&self, error: ProviderError) {
        self.state().token_error = Some(error);
    }

    /// Make every `lookup_name` call fail with `error`.
    pub fn fail_lookup(&self, error: ProviderError) {
        self.state().lookup_error = Some(error);
    }

    /// Clear all injected failures.
    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.permissions_error = None;
        state.accounts_error = None;
        state.chain_id_error = None;
        state.native_error = None;
        state.token_error = None;
        state.lookup_error = None;
    }

    /// Snapshot of the per-method call counters.
    #[must_use]
    pub fn calls(&self) -> MockCalls {
        *self.calls.lock().expect("mock call counter lock poisoned")
    }

    /// Fire an `accountsChanged` notification to subscribers.
    pub fn emit_accounts_changed(&self, accounts: Vec<Address>) {
        let _ = self.events.send(ProviderEvent::AccountsChanged(accounts));
    }

    /// Fire a `chainChanged` notification to subscribers.
    pub fn emit_chain_changed(&self, chain_id: u64) {
        let _ = self.events.send(ProviderEvent::ChainChanged(chain_id));
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    fn capability(&self) -> Capability {
        self.state().capability
    }

    async fn request_permissions(&self) -> ProviderResult<()> {
        self.count(|c| c.request_permissions += 1);
        match self.state().permissions_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.count(|c| c.request_accounts += 1);
        let state = self.state();
        match state.accounts_error.clone() {
            Some(err) => Err(err),
            None => Ok(state.accounts.clone()),
        }
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        self.count(|c| c.chain_id += 1);
        let state = self.state();
        match state.chain_id_error.clone() {
            Some(err) => Err(err),
            None => Ok(state.chain_id),
        }
    }

    async fn native_balance(&self, address: Address) -> ProviderResult<U256> {
        self.count(|c| c.native_balance += 1);
        let state = self.state();
        match state.native_error.clone() {
            Some(err) => Err(err),
            None => Ok(state.native.get(&address).copied().unwrap_or(U256::ZERO)),
        }
    }

    async fn token_balance(&self, token: Address, owner: Address) -> ProviderResult<U256> {
        self.count(|c| c.token_balance += 1);
        let state = self.state();
        match state.token_error.clone() {
            Some(err) => Err(err),
            None => Ok(state
                .tokens
                .get(&(token, owner))
                .copied()
                .unwrap_or(U256::ZERO)),
        }
    }

    async fn lookup_name(&self, address: Address) -> ProviderResult<Option<String>> {
        self.count(|c| c.lookup_name += 1);
        let state = self.state();
        match state.lookup_error.clone() {
            Some(err) => Err(err),
            None => Ok(state.names.get(&address).cloned()),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}
