//! Network configuration records.

use super::ChainId;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

/// Kind of network a configuration points at.
///
/// Built-in kinds are hosted networks addressed by this symbolic type, so the same network
/// stays reachable when its endpoint changes. Everything else is [`NetworkType::Custom`] and
/// must be addressed by its [`NetworkClientId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkType {
    Mainnet,
    Goerli,
    Sepolia,
    LineaGoerli,
    LineaSepolia,
    LineaMainnet,
    #[serde(alias = "rpc")]
    Custom,
}

impl NetworkType {
    /// All built-in kinds, in display order.
    pub const BUILT_IN: [NetworkType; 6] = [
        Self::Mainnet,
        Self::Goerli,
        Self::Sepolia,
        Self::LineaGoerli,
        Self::LineaSepolia,
        Self::LineaMainnet,
    ];

    #[inline]
    #[must_use]
    pub fn is_built_in(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Chain id a built-in kind always serves. `None` for custom networks.
    #[must_use]
    pub fn built_in_chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Mainnet => Some(ChainId::MAINNET),
            Self::Goerli => Some(ChainId::GOERLI),
            Self::Sepolia => Some(ChainId::SEPOLIA),
            Self::LineaGoerli => Some(ChainId::LINEA_GOERLI),
            Self::LineaSepolia => Some(ChainId::LINEA_SEPOLIA),
            Self::LineaMainnet => Some(ChainId::LINEA_MAINNET),
            Self::Custom => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Goerli => "goerli",
            Self::Sepolia => "sepolia",
            Self::LineaGoerli => "linea-goerli",
            Self::LineaSepolia => "linea-sepolia",
            Self::LineaMainnet => "linea-mainnet",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known network type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network type: {0}")]
pub struct UnknownNetworkType(pub String);

impl FromStr for NetworkType {
    type Err = UnknownNetworkType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "goerli" => Ok(Self::Goerli),
            "sepolia" => Ok(Self::Sepolia),
            "linea-goerli" => Ok(Self::LineaGoerli),
            "linea-sepolia" => Ok(Self::LineaSepolia),
            "linea-mainnet" => Ok(Self::LineaMainnet),
            "custom" | "rpc" => Ok(Self::Custom),
            _ => Err(UnknownNetworkType(s.to_string())),
        }
    }
}

/// Internal identifier of a network client.
///
/// Built-in networks use their type name; custom networks get whatever id the network
/// management layer assigned when the network was added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkClientId(Arc<str>);

impl NetworkClientId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NetworkClientId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for NetworkClientId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// How to reach a given chain.
///
/// Owned by the network management layer; the switch flow only ever reads these.
///
/// # Example
///
/// ```
/// use chainswitch_core::chain::{ChainId, NetworkConfiguration, NetworkType};
///
/// let mainnet = NetworkConfiguration::built_in(NetworkType::Mainnet).unwrap();
/// assert_eq!(mainnet.chain_id, ChainId::MAINNET);
/// assert_eq!(mainnet.id.as_str(), "mainnet");
///
/// let custom = NetworkConfiguration::custom("123", "0x123456789".parse().unwrap())
///     .with_nickname("Local devnet");
/// assert!(!custom.is_built_in());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfiguration {
    pub id: NetworkClientId,
    pub chain_id: ChainId,
    #[serde(rename = "type")]
    pub network_type: NetworkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

impl NetworkConfiguration {
    /// Configuration for a built-in network kind. Returns `None` for [`NetworkType::Custom`].
    #[must_use]
    pub fn built_in(network_type: NetworkType) -> Option<Self> {
        let chain_id = network_type.built_in_chain_id()?;
        Some(Self {
            id: NetworkClientId::from(network_type.as_str()),
            chain_id,
            network_type,
            nickname: None,
            rpc_url: None,
        })
    }

    pub fn custom(id: impl Into<NetworkClientId>, chain_id: ChainId) -> Self {
        Self {
            id: id.into(),
            chain_id,
            network_type: NetworkType::Custom,
            nickname: None,
            rpc_url: None,
        }
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    #[must_use]
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn is_built_in(&self) -> bool {
        self.network_type.is_built_in()
    }
}
