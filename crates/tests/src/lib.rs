//! Integration tests for chainswitch.
//!
//! - `coordinator_race_tests`: interleavings of concurrent switch requests, held at prompts
//! - `runtime_tests`: end-to-end dispatch through a fully built runtime and approval queue
//! - `http_tests`: the assembled axum application, driven with `oneshot`
//! - `config_tests`: layered file and environment configuration loading
//! - `mock_infrastructure`: recording hooks and shared helpers
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package tests
//! ```

pub mod mock_infrastructure;

#[cfg(test)]
mod config_tests;
