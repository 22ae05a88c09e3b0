//! Error taxonomy for every client operation.
//!
//! A server that understood the request and refused it yields
//! [`ClientError::Api`]. Anything the client could not make sense of yields
//! [`ClientError::Unexpected`] or [`ClientError::Transport`].

mod api;

pub use api::{ApiError, ApiErrorCode, BadRequestReason, InvalidCardReason};

use crate::config::PublicKeyError;

const TRY_AGAIN_LATER: &str =
    "Please try again later. If the same problem persists please contact customer support.";

/// Errors produced by the SDK client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server reported a structured error.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// A response arrived that could not be interpreted.
    #[error("unexpected response: {kind}")]
    Unexpected {
        kind: UnexpectedError,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The request payload could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid public key: {0}")]
    PublicKey(#[from] PublicKeyError),
}

impl ClientError {
    pub fn unexpected(kind: UnexpectedError) -> Self {
        ClientError::Unexpected { kind, source: None }
    }

    /// True only when the server understood the request and refused it.
    pub fn is_expected(&self) -> bool {
        matches!(self, ClientError::Api(_))
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(error) => Some(error),
            _ => None,
        }
    }

    /// Short English hint for the end user, if one applies.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ClientError::Api(error) => match error.code {
                ApiErrorCode::AuthenticationFailure => Some("Please contact the merchant"),
                ApiErrorCode::ServiceNotFound => Some(TRY_AGAIN_LATER),
                _ => None,
            },
            ClientError::Transport(_) | ClientError::Unexpected { .. } => Some(TRY_AGAIN_LATER),
            _ => None,
        }
    }
}

/// Ways a response can fail to make sense.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnexpectedError {
    #[error("no error nor response")]
    NoErrorNorResponse,
    #[error("no error data in the error response")]
    HttpErrorWithNoData,
    #[error("invalid error data in the error response")]
    HttpErrorResponseWithInvalidData,
    #[error("no data in the success response")]
    HttpSuccessWithNoData,
    #[error("invalid data in the success response")]
    HttpSuccessWithInvalidData,
    #[error("unrecognized HTTP status code {0}")]
    UnrecognizedHttpStatusCode(u16),
    #[error("{0}")]
    Other(String),
}

/// Failures below HTTP: connection, TLS, timeout.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[cfg(feature = "client")]
    #[error("http error: {0}")]
    Http(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connection(error.to_string())
        } else {
            TransportError::Http(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_api_errors_are_expected() {
        let api = ClientError::Api(ApiError::new(
            "bad_request",
            "type is currently not supported",
            "",
        ));
        assert!(api.is_expected());
        assert!(api.api_error().is_some());

        let unexpected = ClientError::unexpected(UnexpectedError::HttpSuccessWithNoData);
        assert!(!unexpected.is_expected());
        assert_eq!(unexpected.recovery_suggestion(), Some(TRY_AGAIN_LATER));

        let transport = ClientError::from(TransportError::Timeout);
        assert!(!transport.is_expected());
    }

    #[test]
    fn test_unexpected_display() {
        let error = ClientError::unexpected(UnexpectedError::UnrecognizedHttpStatusCode(302));
        assert_eq!(error.to_string(), "unexpected response: unrecognized HTTP status code 302");
    }
}
