//! Mock infrastructure for driving the chain switch coordinator without a wallet UI.
//!
//! ## Components
//!
//! - `RecordingHooks`: a `ChainSwitchHooks` implementation over real registry, state and
//!   permission components, recording every hook call and holding prompts until the test
//!   answers them
//! - Test helpers for configs, origins and polling
//!
//! ## Usage
//!
//! ```ignore
//! use tests::mock_infrastructure::{RecordingHooks, PromptMode};
//!
//! let hooks = RecordingHooks::builder().prompt_mode(PromptMode::Manual).build();
//! let coordinator = ChainSwitchCoordinator::new(hooks.clone());
//! // ... spawn a switch, then:
//! hooks.answer_next(true).await;
//! ```

pub mod recording_hooks;
pub mod test_helpers;

pub use recording_hooks::{HookEvent, PromptMode, RecordingHooks, RecordingHooksBuilder};
pub use test_helpers::*;
