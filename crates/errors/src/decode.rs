//! Malformed metadata payloads

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("failed to decode {what}: {message}")]
pub struct DecodingError {
    pub what: String,
    pub message: String,
}

impl DecodingError {
    pub fn new(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            message: message.into(),
        }
    }
}

impl UserFacingError for DecodingError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("The metadata service returned an unexpected payload; check the base URL.")
    }

    fn user_code(&self) -> Option<&'static str> {
        Some("decoding.payload")
    }
}
