use thiserror::Error;

/// Main error type for Helix API operations
///
/// Structured API errors (4xx responses with an `{error, status, message}`
/// body) are deliberately not part of this enum: the call still succeeds from
/// the library's perspective and the triple is returned inside the response
/// envelope. Callers must check both this error and the envelope's error
/// fields.
#[derive(Debug, Error)]
pub enum HelixError {
    /// The transport could not complete the request (network, timeout)
    #[error("request execution failed: {0}")]
    RequestExecution(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body did not match the expected shape for its status class
    #[error("response decode failed: {source}")]
    ResponseDecode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Other errors, including values produced by rate-limit policies
    #[error("{0}")]
    Other(String),
}

impl HelixError {
    /// Wrap a transport-level failure
    pub fn request_execution<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HelixError::RequestExecution(Box::new(source))
    }

    /// Wrap a JSON decode failure for the given HTTP status
    pub fn response_decode(status: u16, source: serde_json::Error) -> Self {
        HelixError::ResponseDecode { status, source }
    }

    /// Check if this error came from the transport layer
    pub fn is_request_execution(&self) -> bool {
        matches!(self, HelixError::RequestExecution(_))
    }

    /// Check if this error came from response decoding
    pub fn is_response_decode(&self) -> bool {
        matches!(self, HelixError::ResponseDecode { .. })
    }
}

/// Result type for Helix operations
pub type Result<T> = std::result::Result<T, HelixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_execution_predicate() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timeout");
        let error = HelixError::request_execution(io);
        assert!(error.is_request_execution());
        assert!(!error.is_response_decode());
        assert!(error.to_string().starts_with("request execution failed"));
    }

    #[test]
    fn test_response_decode_keeps_status() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = HelixError::response_decode(200, bad);
        assert!(error.is_response_decode());
        match error {
            HelixError::ResponseDecode { status, .. } => assert_eq!(status, 200),
            other => panic!("expected ResponseDecode, got {:?}", other),
        }
    }
}
