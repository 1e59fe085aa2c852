//! The `wallet_switchEthereumChain` flow.
//!
//! [`ChainSwitchCoordinator`] decides whether a switch may happen and commits it. Everything
//! it needs from the wallet goes through the [`ChainSwitchHooks`] trait; [`WalletHooks`] is
//! the implementation wired up by the runtime.

mod coordinator;
mod errors;
mod hooks;
mod wallet;

#[cfg(test)]
mod tests;

pub use coordinator::{ApprovalPath, ChainSwitchCoordinator, SwitchOutcome};
pub use errors::SwitchError;
pub use hooks::ChainSwitchHooks;
pub use wallet::WalletHooks;
