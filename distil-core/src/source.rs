use crate::Result;
use async_trait::async_trait;

/// An external document-retrieval capability.
///
/// Returns source text relevant to a topic, or fails with
/// [`DistilError::Retrieval`](crate::DistilError::Retrieval). The returned
/// string is untrusted free text of unbounded length; callers truncate after
/// receipt. Result-count and per-document length caps are construction-time
/// parameters of the implementation, not per-call options.
#[async_trait]
pub trait TextSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch(&self, topic: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DistilError;

    struct FixedSource {
        text: String,
    }

    #[async_trait]
    impl TextSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch(&self, _topic: &str) -> Result<String> {
            if self.text.is_empty() {
                return Err(DistilError::Retrieval("no results".to_string()));
            }
            Ok(self.text.clone())
        }
    }

    #[tokio::test]
    async fn test_source_trait() {
        let source = FixedSource { text: "abstract text".to_string() };
        assert_eq!(source.name(), "fixed");
        assert_eq!(source.fetch("graphs").await.unwrap(), "abstract text");
    }

    #[tokio::test]
    async fn test_source_failure() {
        let source = FixedSource { text: String::new() };
        let err = source.fetch("graphs").await.unwrap_err();
        assert!(matches!(err, DistilError::Retrieval(_)));
    }
}
