use thiserror::Error;
use tracing::debug;

use crate::domain::{ConversionRequest, DomainError, MbtiType};

use super::endpoint::{ConvertEndpoint, EndpointError, EndpointReply};

/// Shown when an error reply has a body that isn't JSON.
pub const UNPARSEABLE_ERROR_MESSAGE: &str = "サーバーエラーが発生しました";
/// Shown when the request never got a reply.
pub const NETWORK_ERROR_MESSAGE: &str = "通信エラーが発生しました";

/// What the form shows below its controls. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Result(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("a conversion is already in flight")]
    Busy,

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("category must not be empty")]
    EmptyCategory,
}

impl From<ViewError> for DomainError {
    fn from(e: ViewError) -> Self {
        DomainError::invalid_input(e.to_string())
    }
}

/// Client-side state of the conversion form.
#[derive(Debug, Clone)]
pub struct FormView {
    message: String,
    category: String,
    state: DisplayState,
}

impl FormView {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            category: MbtiType::default().as_str().to_string(),
            state: DisplayState::Idle,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == DisplayState::Loading
    }

    /// Inputs and the submit button are disabled while loading.
    pub fn controls_disabled(&self) -> bool {
        self.is_loading()
    }

    pub fn can_submit(&self) -> bool {
        !self.message.is_empty() && !self.is_loading()
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> Result<(), ViewError> {
        if self.is_loading() {
            return Err(ViewError::Busy);
        }
        self.message = message.into();
        Ok(())
    }

    pub fn select_category(&mut self, label: impl Into<String>) -> Result<(), ViewError> {
        if self.is_loading() {
            return Err(ViewError::Busy);
        }
        self.category = label.into();
        Ok(())
    }

    /// Enter `Loading` and hand back the one request to send.
    ///
    /// Any previous result or error is cleared.
    pub fn submit(&mut self) -> Result<ConversionRequest, ViewError> {
        if self.is_loading() {
            return Err(ViewError::Busy);
        }
        if self.message.is_empty() {
            return Err(ViewError::EmptyMessage);
        }
        if self.category.is_empty() {
            return Err(ViewError::EmptyCategory);
        }
        let request = ConversionRequest::new(Some(self.message.as_str()), Some(self.category.as_str()))
            .map_err(|e| {
                debug!("Form request rejected: {e}");
                ViewError::EmptyMessage
            })?;

        self.state = DisplayState::Loading;
        Ok(request)
    }

    /// Leave `Loading` with the endpoint's answer. Ignored in any other state.
    pub fn complete(&mut self, reply: Result<EndpointReply, EndpointError>) -> &DisplayState {
        if !self.is_loading() {
            debug!("Ignoring reply outside of a pending conversion");
            return &self.state;
        }

        self.state = match reply {
            Ok(reply) => match extract_outcome(&reply) {
                Ok(text) => DisplayState::Result(text),
                Err(message) => DisplayState::Error(message),
            },
            Err(e) => {
                debug!("Conversion request failed: {e}");
                DisplayState::Error(NETWORK_ERROR_MESSAGE.to_string())
            }
        };
        &self.state
    }

    /// One full submit cycle: submit, send exactly one request, complete.
    pub async fn run(&mut self, endpoint: &dyn ConvertEndpoint) -> Result<&DisplayState, ViewError> {
        let request = self.submit()?;
        let reply = endpoint.send(&request).await;
        Ok(self.complete(reply))
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a reply to the converted text, or to the message the form should show.
fn extract_outcome(reply: &EndpointReply) -> Result<String, String> {
    let parsed = serde_json::from_slice::<serde_json::Value>(&reply.body);

    if reply.is_ok() {
        return parsed
            .ok()
            .and_then(|v| v.get("convertedMessage")?.as_str().map(str::to_string))
            .ok_or_else(|| UNPARSEABLE_ERROR_MESSAGE.to_string());
    }

    match parsed {
        Ok(body) => match body.get("error").and_then(|e| e.as_str()) {
            Some(error) => Err(error.to_string()),
            None if reply.status_text.is_empty() => Err(UNPARSEABLE_ERROR_MESSAGE.to_string()),
            None => Err(reply.status_text.clone()),
        },
        Err(_) => Err(UNPARSEABLE_ERROR_MESSAGE.to_string()),
    }
}
