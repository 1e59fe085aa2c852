//! Runtime initialization and lifecycle management.
//!
//! Wires the registry, the active network state, the permission store, the approval queue and
//! the coordinator together from an [`AppConfig`](crate::config::AppConfig). The same runtime
//! backs the HTTP server and embedded use, e.g. a wallet shell driving the dispatcher directly.
//!
//! # Examples
//!
//! ```no_run
//! use chainswitch_core::{config::AppConfig, runtime::ChainswitchRuntime};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let runtime = ChainswitchRuntime::builder().with_config(config).build()?;
//!
//!     let dispatcher = runtime.dispatcher().clone();
//!     // ... hand the dispatcher to a transport ...
//!
//!     runtime.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod components;
pub mod lifecycle;

pub use builder::{ChainswitchRuntimeBuilder, RuntimeError};
pub use components::ChainswitchComponents;
pub use lifecycle::ChainswitchRuntime;
