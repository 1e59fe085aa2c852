//! JSON-RPC ingress for the wallet methods.
//!
//! Requests are validated here and chain ids are normalized before anything reaches the
//! coordinator, so the rest of the crate only ever sees canonical [`crate::chain::ChainId`]s.

mod dispatcher;
mod params;
mod validation;

pub use dispatcher::RpcDispatcher;
pub use params::SwitchChainParams;
pub use validation::ValidationError;
