//! Chain identity and per-origin network state.
//!
//! - [`ChainId`]: canonical hex chain identifier. Parsing is the normalization boundary, so
//!   every `ChainId` in the system is already lower-case and `0x`-prefixed.
//! - [`NetworkConfiguration`]: how to reach a chain (client id, chain id, kind).
//! - [`ActiveNetworkState`]: which configuration each origin is currently using.
//!
//! # Ownership
//!
//! ```text
//!                 ┌─────────────────────┐
//!                 │ ActiveNetworkState  │
//!                 │  (single instance)  │
//!                 └──────────┬──────────┘
//!                            │ Arc<ActiveNetworkState>
//!            ┌───────────────┴───────────────┐
//!            ▼                               ▼
//!   ┌─────────────────┐             ┌─────────────────┐
//!   │  WalletHooks    │             │  RpcDispatcher  │
//!   │ reads + COMMITS │             │ reads (eth_     │
//!   │ (under per-     │             │  chainId)       │
//!   │  origin lock)   │             │                 │
//!   └─────────────────┘             └─────────────────┘
//! ```
//!
//! Only the commit step of a chain switch writes to the state. Create one instance at startup
//! and share it by `Arc`; a second instance would give origins two different answers.

pub mod id;
pub mod network;
pub mod state;

pub use id::{ChainId, ChainIdError, MAX_SAFE_CHAIN_ID};
pub use network::{NetworkClientId, NetworkConfiguration, NetworkType, UnknownNetworkType};
pub use state::ActiveNetworkState;
