//! Error types for watchdesk.

use thiserror::Error;

/// Result type alias using watchdesk's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for watchdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication failed (bad credentials, missing or rejected refresh token)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The session could not be recovered; credentials were cleared
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Server answered with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// HTTP/network request failed before a response arrived
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Attachment upload failed or was not possible
    #[error("Upload error: {0}")]
    Upload(String),

    /// Credential or draft store operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error carries an HTTP 401 from the server.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Http { status: 401, .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_auth() {
        let err = Error::Auth("no refresh token available".to_string());
        assert_eq!(
            err.to_string(),
            "Authentication error: no refresh token available"
        );
    }

    #[test]
    fn test_error_display_session_expired() {
        let err = Error::SessionExpired("refresh rejected".to_string());
        assert_eq!(err.to_string(), "Session expired: refresh rejected");
    }

    #[test]
    fn test_error_display_http() {
        let err = Error::Http {
            status: 404,
            message: "incident not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: incident not found");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "Request error: connection refused");
    }

    #[test]
    fn test_error_display_upload() {
        let err = Error::Upload("no file to upload".to_string());
        assert_eq!(err.to_string(), "Upload error: no file to upload");
    }

    #[test]
    fn test_error_display_storage() {
        let err = Error::Storage("draft write failed".to_string());
        assert_eq!(err.to_string(), "Storage error: draft write failed");
    }

    #[test]
    fn test_is_unauthorized() {
        let err = Error::Http {
            status: 401,
            message: "token expired".to_string(),
        };
        assert!(err.is_unauthorized());
        let err = Error::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_unauthorized());
        assert!(!Error::Auth("x".to_string()).is_unauthorized());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
