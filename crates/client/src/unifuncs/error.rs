//! UniFuncs API client error types.

use serde::ser::SerializeStruct;
use std::sync::Arc;

/// Status code carried by every locally-synthesized error, distinguishing
/// client-side failures from the negative codes the service itself returns.
pub const LOCAL_ERROR_CODE: i64 = -1;

/// Errors the UniFuncs client synthesizes locally.
///
/// Remote application errors never appear here; they travel inside the
/// response envelope with their original code.
#[derive(Debug, thiserror::Error)]
pub enum UniFuncsError {
    /// No bearer token available at construction.
    #[error("missing API key: set UNIFUNCS_API_KEY or pass a key explicitly")]
    MissingApiKey,

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Non-2xx HTTP status.
    #[error("HTTP error: status {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// Response body was not the expected JSON envelope.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl UniFuncsError {
    /// The synthetic status code, always [`LOCAL_ERROR_CODE`].
    pub fn code(&self) -> i64 {
        LOCAL_ERROR_CODE
    }
}

impl From<reqwest::Error> for UniFuncsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UniFuncsError::Timeout
        } else {
            UniFuncsError::Network(Arc::new(err))
        }
    }
}

/// Serializes as `{"error": <message>, "code": -1}`, the shape front-ends
/// report for local failures.
impl serde::Serialize for UniFuncsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("UniFuncsError", 2)?;
        state.serialize_field("error", &self.to_string())?;
        state.serialize_field("code", &self.code())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UniFuncsError::Http { status: 502 };
        assert_eq!(err.to_string(), "HTTP error: status 502");

        let err = UniFuncsError::Parse("expected value at line 1".to_string());
        assert!(err.to_string().contains("failed to parse response"));

        let err = UniFuncsError::Timeout;
        assert_eq!(err.to_string(), "request timeout");
    }

    #[test]
    fn test_every_variant_uses_the_local_code() {
        assert_eq!(UniFuncsError::MissingApiKey.code(), LOCAL_ERROR_CODE);
        assert_eq!(UniFuncsError::Timeout.code(), LOCAL_ERROR_CODE);
        assert_eq!(UniFuncsError::Http { status: 404 }.code(), LOCAL_ERROR_CODE);
        assert_eq!(UniFuncsError::Parse("bad".to_string()).code(), LOCAL_ERROR_CODE);
    }

    #[test]
    fn test_serialize_shape() {
        let err = UniFuncsError::Timeout;
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"error": "request timeout", "code": -1})
        );
    }
}
