//! Error types for the watermarking service

use thiserror::Error;

/// Result type for service calls
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while talking to the watermarking endpoint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Non-success HTTP status
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Network connection failed
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Invalid endpoint URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Success status but nothing in the body
    #[error("Service returned an empty body")]
    EmptyBody,

    /// Success status but the body is not an image
    #[error("Service returned {0} instead of an image")]
    UnexpectedContent(String),

    /// Client could not be built or the request could not be assembled
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    /// Whether the failure came from the service itself rather than the network
    pub fn is_server_side(&self) -> bool {
        match self {
            ServiceError::Http { status, .. } => *status >= 500,
            ServiceError::EmptyBody | ServiceError::UnexpectedContent(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ServiceError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else if e.is_builder() {
            ServiceError::Configuration(e.to_string())
        } else {
            ServiceError::Connection(e.to_string())
        }
    }
}

impl From<reqwest::header::ToStrError> for ServiceError {
    fn from(e: reqwest::header::ToStrError) -> Self {
        ServiceError::UnexpectedContent(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_side_classification() {
        let internal = ServiceError::Http {
            status: 500,
            message: "Internal Server Error".into(),
        };
        let bad_request = ServiceError::Http {
            status: 400,
            message: "Bad Request".into(),
        };

        assert!(internal.is_server_side());
        assert!(!bad_request.is_server_side());
        assert!(ServiceError::EmptyBody.is_server_side());
        assert!(!ServiceError::Connection("refused".into()).is_server_side());
    }

    #[test]
    fn test_display() {
        let err = ServiceError::Http {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "HTTP error: 502 - Bad Gateway");
    }
}
