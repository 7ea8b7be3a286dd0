//! # distil-model
//!
//! [`Generator`](distil_core::Generator) implementations for distil.
//!
//! - [`OpenAIGenerator`] - OpenAI and OpenAI-compatible chat completions
//!   endpoints over reqwest, with bounded retry for transient HTTP failures
//! - [`MockGenerator`] - scripted responses for tests and offline runs
//!
//! Model identifier, temperature, and token caps are construction-time
//! parameters ([`OpenAIConfig`]); nothing is negotiated per call.

pub mod mock;
pub mod openai;
pub mod retry;

pub use mock::MockGenerator;
pub use openai::{OPENAI_API_BASE, OpenAIConfig, OpenAIGenerator};
pub use retry::{RetryConfig, execute_with_retry, is_retryable_status_code};
