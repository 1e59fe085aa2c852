//! Layered configuration loading: file, then `CHAINSWITCH__` environment overrides.
//!
//! Environment variables are process-global, so every test here runs under `#[serial]`.

use chainswitch_core::{
    chain::{ChainId, NetworkType},
    config::AppConfig,
    runtime::ChainswitchRuntime,
    switch::ChainSwitchHooks,
};
use serial_test::serial;
use std::path::PathBuf;

const OVERRIDES: &[&str] = &[
    "CHAINSWITCH__SERVER__BIND_PORT",
    "CHAINSWITCH__PERMISSIONS__ENABLED",
    "CHAINSWITCH__LOGGING__FORMAT",
    "CHAINSWITCH_CONFIG",
];

/// Removes the file and the environment overrides when the test ends, pass or fail.
struct Scratch {
    path: PathBuf,
}

impl Scratch {
    fn write(contents: &str) -> Self {
        let name = format!("chainswitch-{}.toml", uuid::Uuid::new_v4());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).expect("temp config is writable");
        Self { path }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        for key in OVERRIDES {
            std::env::remove_var(key);
        }
    }
}

const DEVNET_CONFIG: &str = r#"
[server]
bind_port = 4040

[permissions]
enabled = true

[networks]
default_chain_id = "0xAA36A7"

[[networks.configurations]]
id = "sepolia"
chain_id = "0xaa36a7"
type = "sepolia"

[[networks.configurations]]
id = "local-devnet"
chain_id = "0x539"
nickname = "Local devnet"
rpc_url = "http://127.0.0.1:8545"
"#;

#[test]
#[serial]
fn test_file_values_and_defaults() {
    let scratch = Scratch::write(DEVNET_CONFIG);

    let config = AppConfig::from_file(&scratch.path).expect("config loads");

    assert_eq!(config.server.bind_port, 4040);
    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.logging.format, "pretty");
    assert!(config.permissions_enabled());
    assert_eq!(config.default_chain_id().unwrap(), ChainId::SEPOLIA);

    let networks = config.network_configurations().unwrap();
    assert_eq!(networks.len(), 2);
    assert_eq!(networks[1].network_type, NetworkType::Custom);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let scratch = Scratch::write(DEVNET_CONFIG);
    std::env::set_var("CHAINSWITCH__SERVER__BIND_PORT", "5050");
    std::env::set_var("CHAINSWITCH__PERMISSIONS__ENABLED", "false");
    std::env::set_var("CHAINSWITCH__LOGGING__FORMAT", "json");

    let config = AppConfig::from_file(&scratch.path).expect("config loads");

    assert_eq!(config.server.bind_port, 5050);
    assert!(!config.permissions_enabled());
    assert_eq!(config.logging.format, "json");
}

#[test]
#[serial]
fn test_load_uses_config_path_variable() {
    let scratch = Scratch::write(DEVNET_CONFIG);
    std::env::set_var("CHAINSWITCH_CONFIG", &scratch.path);

    let config = AppConfig::load().expect("config loads");

    assert_eq!(config.server.bind_port, 4040);
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    let scratch = Scratch { path: std::env::temp_dir().join("chainswitch-does-not-exist.toml") };

    let config = AppConfig::from_file(&scratch.path).expect("defaults load");

    assert_eq!(config.server.bind_port, 3030);
    assert_eq!(config.networks.configurations.len(), 6);
    assert_eq!(config.default_chain_id().unwrap(), ChainId::MAINNET);
}

#[tokio::test]
#[serial]
async fn test_loaded_config_builds_runtime() {
    let scratch = Scratch::write(DEVNET_CONFIG);
    let config = AppConfig::from_file(&scratch.path).expect("config loads");

    let runtime =
        ChainswitchRuntime::builder().with_config(config).build().expect("valid runtime");

    assert_eq!(runtime.registry().len(), 2);
    assert_eq!(runtime.state().current_chain_id_for("https://fresh.example"), ChainId::SEPOLIA);
    assert!(runtime.components().hooks().is_permissions_feature_active());
}

#[test]
#[serial]
fn test_invalid_network_rejected_by_validation() {
    let scratch = Scratch::write(
        r#"
[[networks.configurations]]
id = "mainnet"
chain_id = "0x01"
type = "mainnet"
"#,
    );

    let config = AppConfig::from_file(&scratch.path).expect("config parses");

    assert!(config.validate().is_err());
}
