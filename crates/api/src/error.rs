use serde::Deserialize;

use roost_service_traits::{AcceptError, SendError, UploadError};

/// Crate-wide result type for API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-success status. `server_message` is
    /// the optional human-readable `error` field from the response body.
    #[error("HTTP {status}")]
    Http {
        status: u16,
        server_message: Option<String>,
    },

    /// The request failed before a response status was available.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// A base URL or endpoint path did not parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Structured error body the API returns alongside non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl Error {
    pub(crate) fn into_upload_error(self) -> UploadError {
        match self {
            Self::Http {
                status,
                server_message,
            } => UploadError::http(status, server_message),
            Self::Request(source) if source.is_decode() || source.is_builder() => {
                UploadError::unexpected("media upload response", source)
            },
            Self::Request(source) => UploadError::transport("media upload request", source),
            Self::Url(source) => UploadError::unexpected("media endpoint url", source),
        }
    }

    pub(crate) fn into_send_error(self) -> SendError {
        match self {
            Self::Http {
                status,
                server_message,
            } => SendError::http(status, server_message),
            Self::Request(source) if source.is_decode() || source.is_builder() => {
                SendError::unexpected("chat message response", source)
            },
            Self::Request(source) => SendError::transport("chat message request", source),
            Self::Url(source) => SendError::unexpected("chat message endpoint url", source),
        }
    }

    pub(crate) fn into_accept_error(self) -> AcceptError {
        match self {
            Self::Http { status, .. } => AcceptError::http(status),
            Self::Request(source) => AcceptError::transport("chat accept request", source),
            Self::Url(source) => AcceptError::transport("chat accept endpoint url", source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_maps_to_recoverable_send_error() {
        let error = Error::Http {
            status: 429,
            server_message: Some("Rate limited".into()),
        };
        let send = error.into_send_error();
        assert!(send.is_recoverable());
        assert_eq!(send.server_message(), Some("Rate limited"));
    }

    #[test]
    fn error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());

        let body: ErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("nope"));
    }
}
