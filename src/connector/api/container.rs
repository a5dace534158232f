use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{CompletionService, ConvertMessageUseCase};
use crate::connector::adapter::{MockCompletion, OpenAiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::domain::ApiKey;

/// Startup-time configuration, read once and injected.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Completion-service credential. `None` is not fatal at startup; each
    /// conversion request then fails with a configuration error.
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub base_url: String,
    /// Use the offline [`MockCompletion`] instead of calling the network.
    pub mock_completion: bool,
}

impl ContainerConfig {
    /// Read `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_BASE_URL`.
    pub fn from_env(mock_completion: bool) -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok().and_then(ApiKey::new),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            mock_completion,
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mock_completion: false,
        }
    }
}

/// Holds the long-lived services and hands out use cases.
///
/// Everything inside is immutable after construction, so one `Arc<Container>`
/// is shared by all request handlers without locking.
pub struct Container {
    completion_service: Arc<dyn CompletionService>,
    api_key: Option<ApiKey>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let completion_service: Arc<dyn CompletionService> = if config.mock_completion {
            debug!("Using mock completion service");
            Arc::new(MockCompletion::new())
        } else {
            debug!(
                "Using OpenAI completion service at {} model {}",
                config.base_url, config.model
            );
            Arc::new(OpenAiClient::new(&config.model, &config.base_url))
        };

        // The mock never sends the key anywhere, so it runs without one.
        let api_key = match config.api_key {
            None if config.mock_completion => ApiKey::new("mock"),
            None => {
                warn!("OPENAI_API_KEY is not set; conversions will fail until it is configured");
                None
            }
            key => key,
        };

        Self::with_completion(completion_service, api_key)
    }

    /// Wire an explicit completion service, e.g. a recording mock in tests.
    pub fn with_completion(
        completion_service: Arc<dyn CompletionService>,
        api_key: Option<ApiKey>,
    ) -> Self {
        Self {
            completion_service,
            api_key,
        }
    }

    pub fn convert_use_case(&self) -> ConvertMessageUseCase {
        ConvertMessageUseCase::new(self.completion_service.clone(), self.api_key.clone())
    }

    pub fn model_name(&self) -> &str {
        self.completion_service.model_name()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
