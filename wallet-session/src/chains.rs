//! Static per-chain reference data.
//!
//! Read-only lookup tables mapping chain ids to the DAI token contract and
//! to a display name. The table contents mirror the deployed DAI contracts
//! on mainnet and the two test networks; chains without an entry fall back
//! to a zero balance display and a generic `Chain {id}` label.

use alloy::primitives::{Address, address};

/// Chain id of Ethereum mainnet, the only chain where ENS is resolved.
pub const MAINNET_CHAIN_ID: u64 = 1;

/// Decimal precision of the native currency (wei per ETH).
pub const NATIVE_DECIMALS: u8 = 18;

/// Descriptor of an ERC-20 token deployment on a specific chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenContract {
    /// Contract address on that chain.
    pub address: Address,
    /// Token ticker symbol.
    pub symbol: &'static str,
    /// Base-unit decimal precision reported by the contract.
    pub decimals: u8,
}

/// DAI contract deployments by chain id.
pub const DAI_CONTRACTS: &[(u64, TokenContract)] = &[
    (
        1,
        TokenContract {
            address: address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
            symbol: "DAI",
            decimals: 18,
        },
    ),
    // Goerli testnet
    (
        5,
        TokenContract {
            address: address!("0x11fE4B6AE13d2a6055C8D9cF65c55bac32B5d844"),
            symbol: "DAI",
            decimals: 18,
        },
    ),
    // Sepolia testnet
    (
        11155111,
        TokenContract {
            address: address!("0x7AF17A48a6336F7dc1beF9D485139f7B6f4FB5C8"),
            symbol: "DAI",
            decimals: 18,
        },
    ),
];

/// Display names for known chain ids.
pub const NETWORK_NAMES: &[(u64, &str)] = &[
    (1, "Ethereum Mainnet"),
    (5, "Goerli Testnet"),
    (11155111, "Sepolia Testnet"),
    (137, "Polygon Mainnet"),
    (80001, "Mumbai Testnet"),
];

/// Look up the DAI contract deployed on the given chain, if any.
#[must_use]
pub fn dai_contract(chain_id: u64) -> Option<&'static TokenContract> {
    DAI_CONTRACTS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, contract)| contract)
}

/// Display name for a chain id, falling back to `Chain {id}`.
#[must_use]
pub fn network_name(chain_id: u64) -> String {
    NETWORK_NAMES
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map_or_else(|| format!("Chain {chain_id}"), |(_, name)| (*name).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dai_contract_lookup() {
        let mainnet = dai_contract(1).unwrap();
        assert_eq!(
            mainnet.address,
            address!("0x6B175474E89094C44Da98b954EedeAC495271d0F")
        );
        assert_eq!(mainnet.symbol, "DAI");
        assert_eq!(mainnet.decimals, 18);

        assert!(dai_contract(11155111).is_some());
        assert!(dai_contract(5).is_some());
        assert!(dai_contract(137).is_none());
        assert!(dai_contract(80001).is_none());
    }

    #[test]
    fn test_network_names() {
        assert_eq!(network_name(1), "Ethereum Mainnet");
        assert_eq!(network_name(5), "Goerli Testnet");
        assert_eq!(network_name(11155111), "Sepolia Testnet");
        assert_eq!(network_name(137), "Polygon Mainnet");
        assert_eq!(network_name(80001), "Mumbai Testnet");
    }

    #[test]
    fn test_unknown_chain_fallback() {
        assert_eq!(network_name(42161), "Chain 42161");
        assert_eq!(network_name(0), "Chain 0");
    }
}
