//! Common helpers for building configs and waiting on asynchronous state.

use chainswitch_core::{
    chain::NetworkType,
    config::{AppConfig, NetworkEntry},
};
use std::{future::Future, time::Duration};

pub const DAPP: &str = "https://dapp.example";
pub const OTHER_DAPP: &str = "https://other.example";

/// Chain id of the custom network added by [`config_with_devnet`].
pub const DEVNET_CHAIN_ID: &str = "0x539";

/// Default config plus a custom local devnet.
#[must_use]
pub fn config_with_devnet() -> AppConfig {
    let mut config = AppConfig::default();
    config.networks.configurations.push(NetworkEntry {
        id: "local-devnet".to_string(),
        chain_id: DEVNET_CHAIN_ID.to_string(),
        network_type: NetworkType::Custom,
        nickname: Some("Local devnet".to_string()),
        rpc_url: Some("http://127.0.0.1:8545".to_string()),
    });
    config
}

/// Polls `condition` until it holds, failing the test after roughly two seconds.
///
/// # Panics
///
/// Panics if the condition never becomes true.
pub async fn eventually<F, Fut>(what: &str, mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..400 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {what}");
}
