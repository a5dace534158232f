use serde_json::Value;
use tracing::{debug, error};

use crate::domain::{ConversionResult, DomainError};

use super::super::Container;

/// One named field read from the request body.
#[derive(Debug, PartialEq)]
enum BodyField {
    /// Absent, or a falsy value (`null`, `false`, `0`, `""`).
    Missing,
    Text(String),
    /// Present and truthy, but not a string.
    Other,
}

fn body_field(body: &Value, name: &str) -> BodyField {
    match body.get(name) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => BodyField::Missing,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => BodyField::Missing,
        Some(Value::String(s)) if s.is_empty() => BodyField::Missing,
        Some(Value::String(s)) => BodyField::Text(s.clone()),
        Some(_) => BodyField::Other,
    }
}

/// Pull `message` and `mbtiType` out of a raw body.
///
/// Non-object bodies carry neither field and read as missing. Only bytes that
/// are not JSON, a `null` body, or truthy non-string fields are unexpected
/// failures.
fn read_fields(body: &[u8]) -> Result<(Option<String>, Option<String>), DomainError> {
    let body: Value = serde_json::from_slice(body)
        .map_err(|e| DomainError::internal(format!("failed to parse request body: {e}")))?;
    if body.is_null() {
        return Err(DomainError::internal("request body is null"));
    }

    match (body_field(&body, "message"), body_field(&body, "mbtiType")) {
        (BodyField::Text(message), BodyField::Text(mbti_type)) => {
            Ok((Some(message), Some(mbti_type)))
        }
        (BodyField::Missing, _) | (_, BodyField::Missing) => Ok((None, None)),
        _ => Err(DomainError::internal("request fields must be strings")),
    }
}

pub struct ConvertController<'a> {
    container: &'a Container,
}

impl<'a> ConvertController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Handle one raw request body and produce the wire result.
    ///
    /// Server-side failures are logged in full here; the returned result only
    /// carries the reduced client-facing message.
    pub async fn convert(&self, body: &[u8]) -> ConversionResult {
        let outcome = match read_fields(body) {
            Ok((message, mbti_type)) => {
                self.container
                    .convert_use_case()
                    .execute(message, mbti_type)
                    .await
            }
            Err(e) => Err(e),
        };

        match &outcome {
            Err(e) if e.status_code() >= 500 => error!("Conversion failed: {e}"),
            Err(e) => debug!("Rejected conversion request: {e}"),
            Ok(text) => debug!("Converted message ({} chars)", text.chars().count()),
        }

        ConversionResult::from(outcome)
    }
}
