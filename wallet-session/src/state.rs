//! Session state record and transition function.
//!
//! The session is modeled as a single immutable-style record plus a
//! tagged-union [`Action`] applied by [`reduce`]. Every mutation of a
//! [`WalletSession`](crate::session::WalletSession) goes through `reduce`,
//! so the merge semantics per action are the whole transition table.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Observable state of a wallet session.
///
/// One record per session. `is_connected == true` implies `address` and
/// `chain_id` are `Some`. `is_loading` and `error` never survive the same
/// connect attempt: success clears both, failure clears loading and sets
/// the error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// True once an account address has been obtained.
    pub is_connected: bool,
    /// Connected account address.
    pub address: Option<Address>,
    /// Human-readable chain name.
    pub network: Option<String>,
    /// Numeric chain identifier.
    pub chain_id: Option<u64>,
    /// Native balance formatted with 4 fractional digits.
    pub eth_balance: Option<String>,
    /// DAI balance formatted with 2 fractional digits.
    pub dai_balance: Option<String>,
    /// Reverse-resolved ENS name (mainnet only).
    pub ens_name: Option<String>,
    /// True while a connect or switch operation is in flight.
    pub is_loading: bool,
    /// Last user-facing failure message.
    pub error: Option<String>,
}

impl SessionState {
    /// EIP-55 checksummed display form of the connected address.
    #[must_use]
    pub fn address_string(&self) -> Option<String> {
        self.address.map(|address| address.to_checksum(None))
    }

    /// Truncated address for compact display: first 6 + last 4 characters.
    #[must_use]
    pub fn short_address(&self) -> Option<String> {
        self.address_string()
            .map(|s| format!("{}...{}", &s[..6], &s[s.len() - 4..]))
    }
}

/// A state transition of the wallet session.
///
/// Each variant merges a fixed set of fields into [`SessionState`]; the
/// merge semantics live in [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Set the in-flight flag. Touches nothing else.
    SetLoading(bool),
    /// Set or clear the failure message and clear the in-flight flag.
    SetError(Option<String>),
    /// Commit a successful connect: identity, chain, and display name land
    /// atomically, clearing any prior error and the in-flight flag.
    SetWalletInfo {
        /// Connected account address.
        address: Address,
        /// Active chain identifier.
        chain_id: u64,
        /// Display name for the active chain.
        network: String,
    },
    /// Store a freshly formatted native balance.
    SetEthBalance(String),
    /// Store a freshly formatted DAI balance.
    SetDaiBalance(String),
    /// Store (or clear) the reverse-resolved ENS name.
    SetEnsName(Option<String>),
    /// Reset the whole record to its empty initial form.
    Disconnect,
}

/// Apply an [`Action`] to a [`SessionState`], returning the next state.
#[must_use]
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    match action {
        Action::SetLoading(is_loading) => SessionState {
            is_loading,
            ..state.clone()
        },
        Action::SetError(error) => SessionState {
            error,
            is_loading: false,
            ..state.clone()
        },
        Action::SetWalletInfo {
            address,
            chain_id,
            network,
        } => SessionState {
            is_connected: true,
            address: Some(address),
            chain_id: Some(chain_id),
            network: Some(network),
            error: None,
            is_loading: false,
            ..state.clone()
        },
        Action::SetEthBalance(balance) => SessionState {
            eth_balance: Some(balance),
            ..state.clone()
        },
        Action::SetDaiBalance(balance) => SessionState {
            dai_balance: Some(balance),
            ..state.clone()
        },
        Action::SetEnsName(ens_name) => SessionState {
            ens_name,
            ..state.clone()
        },
        Action::Disconnect => SessionState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn connected_state() -> SessionState {
        reduce(
            &SessionState::default(),
            Action::SetWalletInfo {
                address: address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
                chain_id: 1,
                network: "Ethereum Mainnet".to_owned(),
            },
        )
    }

    #[test]
    fn test_set_loading_touches_only_loading() {
        let mut state = connected_state();
        state.error = Some("boom".to_owned());

        let next = reduce(&state, Action::SetLoading(true));
        assert!(next.is_loading);
        assert_eq!(next.error, state.error);
        assert_eq!(next.address, state.address);
    }

    #[test]
    fn test_set_error_clears_loading() {
        let mut state = connected_state();
        state.is_loading = true;

        let next = reduce(&state, Action::SetError(Some("rejected".to_owned())));
        assert_eq!(next.error.as_deref(), Some("rejected"));
        assert!(!next.is_loading);
        assert!(next.is_connected);
    }

    #[test]
    fn test_wallet_info_commits_atomically() {
        let mut state = SessionState {
            is_loading: true,
            error: Some("stale".to_owned()),
            ..SessionState::default()
        };
        state.eth_balance = Some("0.1000".to_owned());

        let next = reduce(
            &state,
            Action::SetWalletInfo {
                address: address!("0x7AF17A48a6336F7dc1beF9D485139f7B6f4FB5C8"),
                chain_id: 11155111,
                network: "Sepolia Testnet".to_owned(),
            },
        );
        assert!(next.is_connected);
        assert_eq!(next.chain_id, Some(11155111));
        assert_eq!(next.network.as_deref(), Some("Sepolia Testnet"));
        assert!(next.error.is_none());
        assert!(!next.is_loading);
        // balances carry over untouched
        assert_eq!(next.eth_balance.as_deref(), Some("0.1000"));
    }

    #[test]
    fn test_balance_actions_merge_independently() {
        let state = connected_state();
        let next = reduce(&state, Action::SetEthBalance("1.5000".to_owned()));
        let next = reduce(&next, Action::SetDaiBalance("0.00".to_owned()));

        assert_eq!(next.eth_balance.as_deref(), Some("1.5000"));
        assert_eq!(next.dai_balance.as_deref(), Some("0.00"));
        assert_eq!(next.address, state.address);
    }

    #[test]
    fn test_disconnect_resets_everything() {
        let mut state = connected_state();
        state.eth_balance = Some("1.5000".to_owned());
        state.ens_name = Some("vitalik.eth".to_owned());

        assert_eq!(reduce(&state, Action::Disconnect), SessionState::default());
    }

    #[test]
    fn test_short_address() {
        let state = connected_state();
        let short = state.short_address().unwrap();
        assert!(short.starts_with("0x6B17"));
        assert!(short.contains("..."));
        assert_eq!(short.len(), 13);
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let state = connected_state();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isConnected"], true);
        assert_eq!(json["chainId"], 1);
        assert!(json["ensName"].is_null());
    }
}
