use crate::Result;
use async_trait::async_trait;

/// A stateless text-generation capability.
///
/// Each call is independent: a prompt string in, free-form text out. Providers
/// fix their model identifier and sampling parameters at construction time,
/// so the loop never passes per-call options. Implementations must be safe
/// for concurrent independent calls.
#[async_trait]
pub trait Generator: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str) -> Result<String>;
}
