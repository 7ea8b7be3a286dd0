//! # distil-core
//!
//! Core traits and types for the distil refinement loop.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions shared by every distil
//! crate:
//!
//! - [`Generator`] - a stateless text-generation capability
//! - [`TextSource`] - a document-retrieval capability
//! - [`RunState`] - the record threaded through one refinement run
//! - [`SnapshotStream`] - the lazy sequence of per-cycle snapshots
//! - [`DistilError`] / [`Result`] - unified error handling
//!
//! ## Core Traits
//!
//! Both collaborators are narrow async seams so hosts can inject real
//! providers or test doubles:
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait Generator: Send + Sync {
//!     fn name(&self) -> &str;
//!     async fn generate(&self, prompt: &str) -> Result<String>;
//! }
//!
//! #[async_trait]
//! pub trait TextSource: Send + Sync {
//!     fn name(&self) -> &str;
//!     async fn fetch(&self, topic: &str) -> Result<String>;
//! }
//! ```

pub mod error;
pub mod generator;
pub mod source;
pub mod state;

use futures::stream::Stream;
use std::pin::Pin;

pub use error::{DistilError, Result};
pub use generator::Generator;
pub use source::TextSource;
pub use state::{MAX_CONTENT_CHARS, RunState};

/// The lazy sequence a refinement run hands to its consumer: one full
/// [`RunState`] snapshot per completed cycle, or the error that ended the
/// run.
pub type SnapshotStream = Pin<Box<dyn Stream<Item = Result<RunState>> + Send>>;
