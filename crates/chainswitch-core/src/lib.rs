//! # Chainswitch Core
//!
//! Wallet-side handling of `wallet_switchEthereumChain`: a dapp origin asks to move its
//! active network to another chain and the wallet decides whether, and how, to do so.
//!
//! - **[`chain`]**: Chain id parsing, the network model and the per-origin active network state.
//!
//! - **[`registry`]**: Known network configurations, looked up by chain id, client id or type.
//!
//! - **[`permissions`]**: Per-origin permitted chain sets.
//!
//! - **[`approval`]**: Queue of pending user prompts awaiting a decision.
//!
//! - **[`switch`]**: The coordinator and the capability trait it drives.
//!
//! - **[`rpc`]**: JSON-RPC validation, parameter parsing and dispatch.
//!
//! - **[`runtime`]**: Builds every component from [`config::AppConfig`].
//!
//! ## Request Flow
//!
//! ```text
//! wallet_switchEthereumChain [{ chainId }]
//!       │
//!       ▼
//! ┌──────────────┐
//! │  Validation  │ ─── Invalid ──► -32600 / -32601 / -32602
//! └──────┬───────┘
//!        │ canonical ChainId
//!        ▼
//! ┌──────────────┐
//! │   Registry   │ ─── Unknown ──► 4902
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ Already on?  │ ─── Yes ──► null
//! └──────┬───────┘
//!        │ No
//!        ▼
//! ┌──────────────────────┐
//! │ Permissions active?  │
//! └───┬──────────────┬───┘
//!     │ No           │ Yes
//!     ▼              ▼
//! Approval      Permitted? ── No ──► Permission prompt
//! prompt             │ Yes                 │
//!     │              │                     │
//!     └──────┬───────┴─────────────────────┘
//!            ▼
//!   Commit by type (built-in) or by client id (custom)
//! ```

pub mod approval;
pub mod chain;
pub mod config;
pub mod permissions;
pub mod registry;
pub mod rpc;
pub mod runtime;
pub mod switch;
pub mod types;
