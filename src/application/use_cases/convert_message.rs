use std::sync::Arc;

use tracing::{debug, info};

use crate::application::CompletionService;
use crate::domain::{conversion_prompt, ApiKey, ConversionRequest, DomainError};

/// Use case behind `POST /api/convert`: validate, build one prompt, call the
/// completion service once, return the trimmed first completion.
///
/// The credential is injected at construction. A missing key is only reported
/// when a request arrives, after input validation and before any network call.
pub struct ConvertMessageUseCase {
    completion: Arc<dyn CompletionService>,
    api_key: Option<ApiKey>,
}

impl ConvertMessageUseCase {
    pub fn new(completion: Arc<dyn CompletionService>, api_key: Option<ApiKey>) -> Self {
        Self {
            completion,
            api_key,
        }
    }

    /// Validate raw fields and convert.
    pub async fn execute(
        &self,
        message: Option<String>,
        mbti_type: Option<String>,
    ) -> Result<String, DomainError> {
        let request = ConversionRequest::new(message, mbti_type)?;
        self.convert(&request).await
    }

    pub async fn convert(&self, request: &ConversionRequest) -> Result<String, DomainError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| DomainError::configuration("OPENAI_API_KEY is not set"))?;

        if request.known_type().is_none() {
            debug!(
                "Unrecognised MBTI label {:?}, forwarding as-is",
                request.mbti_type()
            );
        }

        let prompt = conversion_prompt(request);
        info!(
            "Converting {} chars for {} with {}",
            request.message().chars().count(),
            request.mbti_type(),
            self.completion.model_name()
        );

        let content = self.completion.complete(api_key, &prompt).await?;

        content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(DomainError::UpstreamEmptyResponse)
    }
}
