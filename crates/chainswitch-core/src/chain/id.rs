//! Canonical hex chain identifiers.
//!
//! A [`ChainId`] can only be built through parsing or from a checked integer, so any value
//! that exists is already canonical: lower-case, `0x`-prefixed, no leading zeros. Equality,
//! hashing and ordering are therefore plain integer operations and never need to special-case
//! letter casing.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Largest chain id accepted by wallets: `floor((2^53 - 39) / 2)`.
///
/// Chain ids above this value cannot be used in EIP-155 signatures without overflowing a
/// JavaScript safe integer, so they are rejected at ingress.
pub const MAX_SAFE_CHAIN_ID: u64 = 4_503_599_627_370_476;

/// Errors produced while parsing a chain id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainIdError {
    #[error("missing 0x prefix: {0}")]
    MissingPrefix(String),

    #[error("invalid hex digits: {0}")]
    InvalidHex(String),

    /// `0x0`, `0x01` and friends are not formatted hex quantities.
    #[error("chain id must be non-zero and unpadded: {0}")]
    Padded(String),

    #[error("numerical value greater than max safe value: {0}")]
    Unsafe(String),
}

/// A blockchain network identifier.
///
/// # Example
///
/// ```
/// use chainswitch_core::chain::ChainId;
///
/// let upper: ChainId = "0xE708".parse().unwrap();
/// let lower: ChainId = "0xe708".parse().unwrap();
///
/// assert_eq!(upper, lower);
/// assert_eq!(upper.to_string(), "0xe708");
/// assert_eq!(upper.as_u64(), 59144);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u64);

impl ChainId {
    pub const MAINNET: Self = Self(0x1);
    pub const GOERLI: Self = Self(0x5);
    pub const SEPOLIA: Self = Self(0xaa36a7);
    pub const LINEA_GOERLI: Self = Self(0xe704);
    pub const LINEA_SEPOLIA: Self = Self(0xe705);
    pub const LINEA_MAINNET: Self = Self(0xe708);

    /// Builds a chain id from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`ChainIdError::Padded`] for zero and [`ChainIdError::Unsafe`] for values above
    /// [`MAX_SAFE_CHAIN_ID`].
    pub fn from_u64(value: u64) -> Result<Self, ChainIdError> {
        if value == 0 {
            return Err(ChainIdError::Padded("0x0".to_string()));
        }
        if value > MAX_SAFE_CHAIN_ID {
            return Err(ChainIdError::Unsafe(format!("{value:#x}")));
        }
        Ok(Self(value))
    }

    /// Parses a `0x`-prefixed hex chain id in any letter casing.
    ///
    /// # Errors
    ///
    /// Returns [`ChainIdError`] when the prefix is missing, the digits are not hex, the value
    /// is zero-padded or zero, or the value exceeds [`MAX_SAFE_CHAIN_ID`].
    pub fn parse(input: &str) -> Result<Self, ChainIdError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .ok_or_else(|| ChainIdError::MissingPrefix(input.to_string()))?;

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChainIdError::InvalidHex(input.to_string()));
        }

        if digits.starts_with('0') {
            return Err(ChainIdError::Padded(input.to_string()));
        }

        let value = u64::from_str_radix(digits, 16)
            .map_err(|_| ChainIdError::Unsafe(input.to_string()))?;

        if value > MAX_SAFE_CHAIN_ID {
            return Err(ChainIdError::Unsafe(input.to_string()));
        }

        Ok(Self(value))
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ChainId {
    type Error = ChainIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<u64> for ChainId {
    type Error = ChainIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_u64(value)
    }
}

impl From<ChainId> for u64 {
    fn from(chain_id: ChainId) -> Self {
        chain_id.0
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
