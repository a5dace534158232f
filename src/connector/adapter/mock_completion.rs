use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::CompletionService;
use crate::domain::{ApiKey, DomainError};

const MOCK_MODEL: &str = "mock-completion";

enum MockReply {
    Echo,
    Fixed(Option<String>),
    Fail(String),
}

/// Offline [`CompletionService`] for `serve --mock-completion` and tests.
///
/// By default it echoes the message back tagged with the recipient's label,
/// e.g. `[INFP向けのメッセージ]: ...`. Every prompt it receives is recorded.
pub struct MockCompletion {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::from_reply(MockReply::Echo)
    }

    /// Always answer with `text`, untrimmed.
    pub fn with_reply(text: impl Into<String>) -> Self {
        Self::from_reply(MockReply::Fixed(Some(text.into())))
    }

    /// Answer with a completion that carries no content.
    pub fn without_content() -> Self {
        Self::from_reply(MockReply::Fixed(None))
    }

    /// Fail every call with an upstream error carrying `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self::from_reply(MockReply::Fail(detail.into()))
    }

    fn from_reply(reply: MockReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn echo(prompt: &str) -> String {
        let label = prompt
            .split_once('「')
            .and_then(|(_, rest)| rest.split_once('」'))
            .map(|(label, _)| label)
            .unwrap_or("?");
        let message = prompt
            .rsplit_once("元のメッセージ:\n")
            .map(|(_, m)| m.trim_matches('"'))
            .unwrap_or(prompt);
        format!("[{label}向けのメッセージ]: {message}")
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(
        &self,
        _api_key: &ApiKey,
        prompt: &str,
    ) -> Result<Option<String>, DomainError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Echo => Ok(Some(Self::echo(prompt))),
            MockReply::Fixed(text) => Ok(text.clone()),
            MockReply::Fail(detail) => Err(DomainError::upstream(detail.clone())),
        }
    }

    fn model_name(&self) -> &str {
        MOCK_MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{conversion_prompt, ConversionRequest};

    #[tokio::test]
    async fn test_echo_tags_message_with_label() {
        let mock = MockCompletion::new();
        let request = ConversionRequest::new(Some("明日の会議は延期します"), Some("INFP")).unwrap();
        let key = ApiKey::new("mock").unwrap();

        let reply = mock
            .complete(&key, &conversion_prompt(&request))
            .await
            .unwrap();

        assert_eq!(
            reply.as_deref(),
            Some("[INFP向けのメッセージ]: 明日の会議は延期します")
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_mock_records_call() {
        let mock = MockCompletion::failing("boom");
        let key = ApiKey::new("mock").unwrap();

        assert!(mock.complete(&key, "prompt").await.is_err());
        assert_eq!(mock.prompts(), vec!["prompt".to_string()]);
    }
}
