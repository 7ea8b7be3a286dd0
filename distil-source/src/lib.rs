//! # distil-source
//!
//! [`TextSource`](distil_core::TextSource) implementations for distil.
//!
//! - [`ArxivSource`] - the arXiv export API, reduced to plain text records
//! - [`MockSource`] - scripted fetches for tests
//!
//! Result-count and content-length caps are construction-time parameters
//! ([`ArxivConfig`]); nothing is negotiated per call.

pub mod arxiv;
pub mod mock;

pub use arxiv::{ARXIV_API_BASE, ArxivConfig, ArxivSource};
pub use mock::MockSource;
