//! Wallet dashboard session walkthrough.
//!
//! Drives a full session lifecycle against the built-in mock provider:
//! connect, observe state, switch accounts and chains from the "wallet"
//! side, and disconnect.
//!
//! Run with: `cargo run --example dashboard`

use std::sync::Arc;

use alloy::primitives::{Address, U256, address};
use wallet_session::{MockProvider, SessionState, WalletProvider, WalletSession};

const ALICE: Address = address!("0xABCD000000000000000000000000000000001234");
const MAINNET_DAI: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");

fn print_state(label: &str, state: &SessionState) {
    println!("--- {label} ---");
    match state.short_address() {
        Some(short) => println!(
            "  {} on {} (ETH {}, DAI {}, ENS {})",
            short,
            state.network.as_deref().unwrap_or("?"),
            state.eth_balance.as_deref().unwrap_or("-"),
            state.dai_balance.as_deref().unwrap_or("-"),
            state.ens_name.as_deref().unwrap_or("-"),
        ),
        None => println!("  not connected"),
    }
    if let Some(error) = &state.error {
        println!("  error: {error}");
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet_session=debug".into()),
        )
        .init();

    println!("=== Wallet Session Demo ===\n");

    // A "browser wallet" with one funded account on mainnet.
    let wallet = Arc::new(
        MockProvider::new()
            .with_accounts(vec![ALICE])
            .with_chain_id(1)
            .with_native_balance(ALICE, U256::from(1_500_000_000_000_000_000_u128))
            .with_token_balance(
                MAINNET_DAI,
                ALICE,
                U256::from(250) * U256::from(10).pow(U256::from(18)),
            )
            .with_name(ALICE, "alice.eth"),
    );

    let session = Arc::new(WalletSession::new(
        Arc::clone(&wallet) as Arc<dyn WalletProvider>
    ));

    // Drive wallet notifications in the background.
    let runner = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.run().await })
    };
    tokio::task::yield_now().await;

    session.connect().await?;
    print_state("after connect", &session.state());

    // The user switches to Sepolia in the wallet UI.
    let mut rx = session.subscribe();
    wallet.set_chain_id(11155111);
    wallet.emit_chain_changed(11155111);
    rx.wait_for(|state| state.chain_id == Some(11155111))
        .await?;
    print_state("after chain switch", &session.state());

    // The wallet revokes authorization entirely.
    wallet.emit_accounts_changed(Vec::new());
    rx.wait_for(|state| !state.is_connected).await?;
    print_state("after revocation", &session.state());

    runner.abort();
    println!("=== Demo Complete ===");
    Ok(())
}
