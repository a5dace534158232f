use thiserror::Error;

/// Shown when `message` or `mbtiType` is missing or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "メッセージとMBTIタイプは必須です";
/// Shown when no completion-service credential was configured at startup.
pub const MISSING_API_KEY_MESSAGE: &str = "OpenAI APIキーが設定されていません";
/// Shown when the completion service answered with no usable text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "AIからの応答がありませんでした";
/// Shown for every other failure. The underlying cause stays in the server log.
pub const CONVERSION_FAILED_MESSAGE: &str = "メッセージの変換中にエラーが発生しました";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream returned an empty completion")]
    UpstreamEmptyResponse,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status the conversion endpoint answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Configuration(_)
            | Self::UpstreamEmptyResponse
            | Self::Upstream(_)
            | Self::Internal(_) => 500,
        }
    }

    /// The message returned to the client.
    ///
    /// Validation errors carry their own text. Configuration and empty-response
    /// errors map to fixed messages. Upstream and internal failures collapse to
    /// one generic message so no internal detail reaches the caller.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::Configuration(_) => MISSING_API_KEY_MESSAGE.to_string(),
            Self::UpstreamEmptyResponse => EMPTY_RESPONSE_MESSAGE.to_string(),
            Self::Upstream(_) | Self::Internal(_) => CONVERSION_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}
