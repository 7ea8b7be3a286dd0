//! # distil-loop
//!
//! The bounded refinement loop at the heart of distil.
//!
//! One run is a sequence of cycles, each a strictly ordered chain:
//! summarize (fetch + generate) → evaluate (generate) → check pass
//! (generate, or forced once the cycle cap is reached) → route. The loop
//! yields a full [`RunState`](distil_core::RunState) snapshot to the
//! consumer after every completed cycle and always terminates within
//! [`MAX_CYCLES`] cycles.
//!
//! Collaborators ([`Generator`](distil_core::Generator) and
//! [`TextSource`](distil_core::TextSource)) are injected at construction;
//! the loop itself never retries a failed call — a failed step ends the run
//! and the host starts a fresh one.

pub mod prompts;
pub mod refine;
pub mod verdict;

pub use refine::{MAX_CYCLES, RefineLoop, finalize};
pub use verdict::is_pass;
