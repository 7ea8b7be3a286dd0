//! Scripted generator for tests and offline runs.

use async_trait::async_trait;
use distil_core::{DistilError, Generator, Result};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// [`Generator`] returning a fixed script of responses in order.
///
/// Exhausting the script is a generation error, which keeps tests honest
/// about exactly how many calls a scenario is allowed to make.
pub struct MockGenerator {
    name: String,
    responses: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl MockGenerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), responses: Mutex::new(Vec::new()), call_count: AtomicUsize::new(0) }
    }

    /// Append one scripted response.
    #[must_use]
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().insert(0, response.into());
        self
    }

    /// Number of `generate` calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| DistilError::Generation("No more mock responses".to_string()))
    }
}
