//! Backend response envelope.
//!
//! Every endpoint answers with `{success, message?, data?, error?}`. The
//! helpers here turn that shape into a [`Result`], so callers never branch
//! on the `success` flag themselves.

use crate::error::{MscError, Result};
use serde::{Deserialize, Serialize};

/// Message used when a failed envelope carries no text at all.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Raw response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of a successful envelope, with the backend's status message.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSuccess<T> {
    pub data: T,
    pub message: Option<String>,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiSuccess<U> {
        ApiSuccess {
            data: f(self.data),
            message: self.message,
        }
    }
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Best error text: `error` first, then `message`, skipping blanks.
    pub fn failure_message(&self) -> Option<String> {
        non_blank(self.error.as_deref()).or_else(|| non_blank(self.message.as_deref()))
    }

    /// Converts into a result that requires `data` on success.
    ///
    /// `status` is the HTTP status the envelope arrived with, if any.
    pub fn into_success(self, status: Option<u16>) -> Result<ApiSuccess<T>> {
        if !self.success {
            return Err(self.into_error(status));
        }
        let message = non_blank(self.message.as_deref());
        match self.data {
            Some(data) => Ok(ApiSuccess { data, message }),
            None => Err(MscError::malformed("successful response without data")),
        }
    }

    /// Converts into a result for endpoints whose success carries no data.
    pub fn into_ack(self, status: Option<u16>) -> Result<Option<String>> {
        if !self.success {
            return Err(self.into_error(status));
        }
        Ok(non_blank(self.message.as_deref()))
    }

    fn into_error(self, status: Option<u16>) -> MscError {
        let message = self
            .failure_message()
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        MscError::Api { status, message }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_requires_data() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            env.into_success(Some(200)),
            Err(MscError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_success_keeps_message() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"message":"ok","data":[1,2]}"#).unwrap();
        let success = env.into_success(Some(200)).unwrap();
        assert_eq!(success.data, vec![1, 2]);
        assert_eq!(success.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_failure_prefers_error_then_message() {
        let env: ApiEnvelope<()> = serde_json::from_str(
            r#"{"success":false,"message":"Failed to fetch projects","error":"db down"}"#,
        )
        .unwrap();
        assert_eq!(env.failure_message().as_deref(), Some("db down"));

        let env: ApiEnvelope<()> =
            serde_json::from_str(r#"{"success":false,"message":"Project not found","error":""}"#)
                .unwrap();
        match env.into_success(Some(404)) {
            Err(MscError::Api { status, message }) => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "Project not found");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_failure_without_text_uses_generic_message() {
        let env: ApiEnvelope<()> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        match env.into_ack(None) {
            Err(MscError::Api { message, .. }) => assert_eq!(message, GENERIC_FAILURE_MESSAGE),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
