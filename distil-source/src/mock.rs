//! Scripted text source for tests.

use async_trait::async_trait;
use distil_core::{DistilError, Result, TextSource};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Outcome {
    Text(String),
    Failure(String),
}

/// [`TextSource`] driven by a script of outcomes, with an optional fixed
/// fallback once the script runs out.
///
/// `MockSource::fixed` covers the common case of a source that always
/// returns the same text; scripted failures let tests abort a run on a
/// chosen cycle.
pub struct MockSource {
    name: String,
    script: Mutex<Vec<Outcome>>,
    fallback: Option<String>,
    call_count: AtomicUsize,
}

impl MockSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(Vec::new()),
            fallback: None,
            call_count: AtomicUsize::new(0),
        }
    }

    /// A source that returns the same text on every fetch.
    pub fn fixed(text: impl Into<String>) -> Self {
        let mut source = Self::new("mock-source");
        source.fallback = Some(text.into());
        source
    }

    /// Script one successful fetch.
    #[must_use]
    pub fn with_fetch(self, text: impl Into<String>) -> Self {
        self.script.lock().unwrap().insert(0, Outcome::Text(text.into()));
        self
    }

    /// Script one failing fetch.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().insert(0, Outcome::Failure(message.into()));
        self
    }

    /// Number of `fetch` calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _topic: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(outcome) = self.script.lock().unwrap().pop() {
            return match outcome {
                Outcome::Text(text) => Ok(text),
                Outcome::Failure(message) => Err(DistilError::Retrieval(message)),
            };
        }

        match &self.fallback {
            Some(text) => Ok(text.clone()),
            None => Err(DistilError::Retrieval("No more mock fetches".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_source_repeats() {
        let source = MockSource::fixed("same text");
        assert_eq!(source.fetch("a").await.unwrap(), "same text");
        assert_eq!(source.fetch("b").await.unwrap(), "same text");
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_scripted_outcomes_in_order() {
        let source = MockSource::new("scripted")
            .with_fetch("first")
            .with_failure("rate limited");

        assert_eq!(source.fetch("t").await.unwrap(), "first");
        let err = source.fetch("t").await.unwrap_err();
        assert!(matches!(err, DistilError::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_exhausted_script_without_fallback_fails() {
        let source = MockSource::new("empty");
        let err = source.fetch("t").await.unwrap_err();
        assert!(matches!(err, DistilError::Retrieval(_)));
    }
}
