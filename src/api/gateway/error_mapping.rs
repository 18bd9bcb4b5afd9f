//! Error mapping helpers for the HTTP gateway.

use http::StatusCode;

use crate::api::error::ClientError;

/// Checks if a status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Maps a transport-level `reqwest` failure.
pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ClientError {
    if error.is_decode() {
        return ClientError::Api {
            message: format!("{operation} returned an unreadable body: {error}"),
        };
    }
    ClientError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success HTTP status and optional body message.
pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ClientError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        ClientError::Authentication {
            message: format!("{operation} returned {status}: {message}"),
        }
    } else if status == StatusCode::NOT_FOUND {
        ClientError::NotFound {
            resource: operation.to_owned(),
        }
    } else {
        ClientError::Api { message }
    }
}

/// Maps a body that could not be decoded into the expected shape.
pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> ClientError {
    ClientError::Api {
        message: format!("{operation} returned an unexpected body: {error}"),
    }
}
