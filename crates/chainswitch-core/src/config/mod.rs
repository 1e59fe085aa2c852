//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: `Default` implementations and serde field defaults
//! 2. **Config file**: TOML file specified by the `CHAINSWITCH_CONFIG` env var
//! 3. **Environment variables**: `CHAINSWITCH__*` env vars override specific fields
//!
//! # Configuration Sections
//!
//! - [`ServerConfig`]: HTTP server settings (bind address, concurrency)
//! - [`LoggingConfig`]: Log level and format
//! - [`PermissionsConfig`]: Whether chain access is gated per origin
//! - [`NetworksConfig`]: Known networks and the wallet-wide default
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind_address = "127.0.0.1"
//! bind_port = 3030
//!
//! [permissions]
//! enabled = true
//!
//! [networks]
//! default_chain_id = "0x1"
//!
//! [[networks.configurations]]
//! id = "mainnet"
//! chain_id = "0x1"
//! type = "mainnet"
//!
//! [[networks.configurations]]
//! id = "local-devnet"
//! chain_id = "0x539"
//! type = "custom"
//! nickname = "Local devnet"
//! rpc_url = "http://127.0.0.1:8545"
//! ```

use crate::chain::{ChainId, NetworkConfiguration, NetworkType};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

/// HTTP server configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind the server to. Defaults to `127.0.0.1`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number to listen on. Must be greater than 0. Defaults to `3030`.
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Maximum number of requests processed at once. Defaults to `100`.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3030
}

fn default_max_concurrent_requests() -> usize {
    100
}

/// Logging configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn"). Defaults to `"info"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `"json"` or `"pretty"`. Defaults to `"pretty"`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Per-origin chain permission settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// When `true`, an origin may only switch to chains it has been granted, and ungranted
    /// chains trigger a permission prompt instead of a switch prompt. Defaults to `false`.
    #[serde(default)]
    pub enabled: bool,
}

/// One network the wallet knows how to reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    /// Network client id. Built-in networks conventionally use their type name.
    pub id: String,

    /// Hex chain id, any letter casing.
    pub chain_id: String,

    #[serde(rename = "type", default = "default_network_type")]
    pub network_type: NetworkType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

fn default_network_type() -> NetworkType {
    NetworkType::Custom
}

impl NetworkEntry {
    /// Parses the entry into a [`NetworkConfiguration`].
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if the chain id is malformed, or if a built-in
    /// network type is paired with a chain id other than its own.
    pub fn to_configuration(&self) -> Result<NetworkConfiguration, String> {
        let chain_id = ChainId::parse(&self.chain_id)
            .map_err(|e| format!("Invalid chain id for network '{}': {e}", self.id))?;

        if let Some(expected) = self.network_type.built_in_chain_id() {
            if expected != chain_id {
                return Err(format!(
                    "Network '{}' has type {} which requires chain id {expected}, got {chain_id}",
                    self.id, self.network_type
                ));
            }
        }

        Ok(NetworkConfiguration {
            id: self.id.as_str().into(),
            chain_id,
            network_type: self.network_type,
            nickname: self.nickname.clone(),
            rpc_url: self.rpc_url.clone(),
        })
    }
}

impl From<&NetworkConfiguration> for NetworkEntry {
    fn from(configuration: &NetworkConfiguration) -> Self {
        Self {
            id: configuration.id.to_string(),
            chain_id: configuration.chain_id.to_string(),
            network_type: configuration.network_type,
            nickname: configuration.nickname.clone(),
            rpc_url: configuration.rpc_url.clone(),
        }
    }
}

/// Known networks and the default every origin starts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworksConfig {
    /// Chain id of the wallet-wide default network. Must be one of `configurations`.
    /// Defaults to `"0x1"`.
    #[serde(default = "default_chain_id")]
    pub default_chain_id: String,

    /// Network configurations. Defaults to the built-in networks.
    #[serde(default = "default_configurations")]
    pub configurations: Vec<NetworkEntry>,
}

fn default_chain_id() -> String {
    ChainId::MAINNET.to_string()
}

fn default_configurations() -> Vec<NetworkEntry> {
    NetworkType::BUILT_IN
        .into_iter()
        .filter_map(NetworkConfiguration::built_in)
        .map(|configuration| NetworkEntry::from(&configuration))
        .collect()
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Chain permission configuration.
    #[serde(default)]
    pub permissions: PermissionsConfig,

    /// Known networks.
    #[serde(default)]
    pub networks: NetworksConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

impl Default for NetworksConfig {
    fn default() -> Self {
        Self { default_chain_id: default_chain_id(), configurations: default_configurations() }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// Environment variables with the `CHAINSWITCH__` prefix can override any scalar value.
    /// Use `__` as a separator for nested fields (e.g., `CHAINSWITCH__SERVER__BIND_PORT=8080`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_builder = Config::builder()
            .set_default("server.bind_address", default_bind_address())?
            .set_default("server.bind_port", i64::from(default_bind_port()))?
            .set_default("server.max_concurrent_requests", 100)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("permissions.enabled", false)?
            .set_default("networks.default_chain_id", default_chain_id())?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("CHAINSWITCH").separator("__"))
            .build()?;

        config_builder.try_deserialize()
    }

    /// Loads configuration from `config/config.toml` with fallback to defaults.
    ///
    /// The config file path can be overridden using the `CHAINSWITCH_CONFIG` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("CHAINSWITCH_CONFIG")
            .unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Returns the parsed socket address for the HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error string if the address cannot be parsed into a valid [`SocketAddr`].
    ///
    /// [`SocketAddr`]: std::net::SocketAddr
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, String> {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
            .parse()
            .map_err(|_| {
                format!(
                    "Invalid socket address: {}:{}",
                    self.server.bind_address, self.server.bind_port
                )
            })
    }

    /// Parses every configured network.
    ///
    /// # Errors
    ///
    /// Returns the first entry's error, see [`NetworkEntry::to_configuration`].
    pub fn network_configurations(&self) -> Result<Vec<NetworkConfiguration>, String> {
        self.networks.configurations.iter().map(NetworkEntry::to_configuration).collect()
    }

    /// Parses `networks.default_chain_id`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the chain id is malformed.
    pub fn default_chain_id(&self) -> Result<ChainId, String> {
        ChainId::parse(&self.networks.default_chain_id)
            .map_err(|e| format!("Invalid default chain id: {e}"))
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - At least one network is configured
    /// - Every chain id parses, and built-in types carry their own chain id
    /// - Chain ids and client ids are unique
    /// - The default chain is one of the configured networks
    /// - Port and concurrency are greater than zero
    /// - Logging format is either `"json"` or `"pretty"`
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.networks.configurations.is_empty() {
            return Err("No networks configured".to_string());
        }

        let configurations = self.network_configurations()?;

        let mut chain_ids = HashSet::new();
        let mut client_ids = HashSet::new();
        for configuration in &configurations {
            if !chain_ids.insert(configuration.chain_id) {
                return Err(format!("Duplicate chain id: {}", configuration.chain_id));
            }
            if !client_ids.insert(configuration.id.clone()) {
                return Err(format!("Duplicate network id: {}", configuration.id));
            }
        }

        let default_chain_id = self.default_chain_id()?;
        if !chain_ids.contains(&default_chain_id) {
            return Err(format!("Default chain id {default_chain_id} is not a configured network"));
        }

        if self.server.max_concurrent_requests == 0 {
            return Err("Max concurrent requests must be greater than 0".to_string());
        }

        if self.server.bind_port == 0 {
            return Err("Bind port must be greater than 0".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }

    #[must_use]
    pub fn permissions_enabled(&self) -> bool {
        self.permissions.enabled
    }

    #[must_use]
    pub fn max_concurrent_requests(&self) -> usize {
        self.server.max_concurrent_requests
    }
}
