use async_trait::async_trait;

use crate::domain::{ApiKey, DomainError};

/// Sends a single prompt to a text-completion model and returns its reply.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details so the conversion use case stays decoupled from any provider.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send `prompt` as one user message and return the text of the first
    /// completion, or `None` when the service returned no content.
    ///
    /// Any transport or service failure is reported as [`DomainError::Upstream`].
    async fn complete(&self, api_key: &ApiKey, prompt: &str)
        -> Result<Option<String>, DomainError>;

    /// Model identifier sent with every request.
    fn model_name(&self) -> &str;
}
