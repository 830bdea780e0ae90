//! Wallet session and balance state management for EIP-1193 dapp dashboards.
//!
//! This crate implements the connection/session lifecycle of a wallet
//! dashboard: connect a MetaMask-compatible wallet, track the connected
//! address, chain, ENS name and ETH/DAI balances, and react to externally
//! fired account/network change notifications. It owns no RPC client and
//! no signing logic: everything external goes through the narrow
//! [`WalletProvider`] trait the embedder implements.
//!
//! # Architecture
//!
//! ```text
//! WalletSession (state machine + async orchestration)
//!   ├── connect()            → authorize accounts, read chain, commit state
//!   ├── disconnect()         → reset to the empty initial state
//!   ├── refresh_balances()   → ETH (4 digits) + DAI (2 digits) display values
//!   ├── resolve_ens()        → reverse lookup, mainnet only
//!   ├── run()                → drive accountsChanged / chainChanged events
//!   └── subscribe()          → watch::Receiver<SessionState> for observers
//! ```
//!
//! State transitions are a pure function: every mutation dispatches an
//! [`Action`] through [`reduce`], and the latest [`SessionState`] is
//! published on a watch channel. [`MockProvider`] ships with the crate for
//! tests and demos.

pub mod chains;
pub mod error;
pub mod provider;
pub mod session;
pub mod state;
pub mod units;

pub use error::{ProviderError, ProviderResult, Result, SessionError};
pub use provider::{Capability, MockCalls, MockProvider, ProviderEvent, WalletProvider};
pub use session::WalletSession;
pub use state::{Action, SessionState, reduce};
