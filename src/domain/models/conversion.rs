use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::error::MISSING_FIELDS_MESSAGE;
use crate::domain::DomainError;

use super::MbtiType;

/// A message to rewrite and the category label of its recipient.
///
/// The label is kept as free text: anything outside the sixteen known codes is
/// still forwarded verbatim into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    message: String,
    #[serde(rename = "mbtiType")]
    mbti_type: String,
}

impl ConversionRequest {
    /// Build a request, rejecting a missing or empty field.
    pub fn new(
        message: Option<impl Into<String>>,
        mbti_type: Option<impl Into<String>>,
    ) -> Result<Self, DomainError> {
        let message = message.map(Into::into).unwrap_or_default();
        let mbti_type = mbti_type.map(Into::into).unwrap_or_default();

        if message.is_empty() || mbti_type.is_empty() {
            return Err(DomainError::invalid_input(MISSING_FIELDS_MESSAGE));
        }

        Ok(Self { message, mbti_type })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn mbti_type(&self) -> &str {
        &self.mbti_type
    }

    /// The label as one of the known codes, if it is one.
    pub fn known_type(&self) -> Option<MbtiType> {
        MbtiType::from_label(&self.mbti_type)
    }
}

/// What the conversion endpoint hands back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Converted(String),
    Failed { error: String, http_status: u16 },
}

impl ConversionResult {
    pub fn http_status(&self) -> u16 {
        match self {
            ConversionResult::Converted(_) => 200,
            ConversionResult::Failed { http_status, .. } => *http_status,
        }
    }

    /// JSON body on the wire: `{"convertedMessage": ...}` or `{"error": ...}`.
    pub fn to_json(&self) -> Value {
        match self {
            ConversionResult::Converted(text) => json!({ "convertedMessage": text }),
            ConversionResult::Failed { error, .. } => json!({ "error": error }),
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionResult::Converted(_))
    }
}

impl From<Result<String, DomainError>> for ConversionResult {
    fn from(outcome: Result<String, DomainError>) -> Self {
        match outcome {
            Ok(text) => ConversionResult::Converted(text),
            Err(e) => ConversionResult::Failed {
                error: e.user_message(),
                http_status: e.status_code(),
            },
        }
    }
}
