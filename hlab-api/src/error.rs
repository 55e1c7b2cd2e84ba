use serde::Deserialize;
use thiserror::Error;

pub const FAILED_TO_CONNECT: &str = "failed to connect";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend responded with status {status}")]
    Backend { status: u16, message: Option<String> },
    #[error("Decoding response failed")]
    Decode(#[from] serde_json::Error),
    #[error("Backend rejected request: {0:?}")]
    Rejected(Option<String>),
    #[error("Request failed")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Message for user facing notifications. Backend supplied messages are
    /// passed verbatim, everything else falls back to the given text.
    pub fn reason_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend {
                message: Some(message),
                ..
            }
            | ApiError::Rejected(Some(message)) => message.to_owned(),
            ApiError::Backend { message: None, .. }
            | ApiError::Rejected(None)
            | ApiError::Decode(_)
            | ApiError::Transport(_) => fallback.to_owned(),
        }
    }

    pub fn reason(&self) -> String {
        self.reason_or(FAILED_TO_CONNECT)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|msg| !msg.is_empty())
    }
}

pub(crate) fn from_status(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);

    ApiError::Backend { status, message }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn backend_error_field_is_preferred() {
        let error = from_status(500, r#"{"error":"db down","message":"ignored"}"#);
        assert_eq!(error.reason(), "db down");
    }

    #[test]
    fn backend_message_field_is_used_without_error() {
        let error = from_status(400, r#"{"success":false,"message":"ssh not configured"}"#);
        assert_eq!(error.reason(), "ssh not configured");
    }

    #[test]
    fn non_json_body_falls_back() {
        let error = from_status(502, "<html>bad gateway</html>");
        assert_eq!(error.reason(), FAILED_TO_CONNECT);
        assert_eq!(error.reason_or("Failed to delete document"), "Failed to delete document");
    }

    #[test]
    fn rejected_without_message_uses_fallback() {
        let error = ApiError::Rejected(None);
        assert_eq!(error.reason_or("Failed to delete pool"), "Failed to delete pool");

        let error = ApiError::Rejected(Some("pool busy".to_owned()));
        assert_eq!(error.reason_or("Failed to delete pool"), "pool busy");
    }

    #[test]
    fn empty_message_falls_back() {
        let error = from_status(500, r#"{"error":""}"#);
        assert_eq!(error.reason(), FAILED_TO_CONNECT);
    }
}
