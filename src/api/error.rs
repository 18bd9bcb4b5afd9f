//! Error types exposed by the bookstore client.

use thiserror::Error;

/// Errors surfaced while validating input or talking to the bookstore API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request needs a bearer token but none is stored or configured.
    #[error("not signed in: log in first")]
    MissingToken,

    /// The API rejected the bearer token or the credentials.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Message returned with the 401/403 response.
        message: String,
    },

    /// A form field failed client-side validation.
    #[error("{field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// The API reported a business error.
    #[error("bookstore API error: {message}")]
    Api {
        /// Message from the response body, or a description of the failure.
        message: String,
    },

    /// Networking failed while calling the API.
    #[error("network error talking to the bookstore API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The navigable location could not be parsed.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ClientError {
    /// Builds a [`ClientError::Validation`] for the given field.
    #[must_use]
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }

    /// Returns true when the error means the session is missing or expired
    /// and the user must log in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Authentication { .. })
    }
}
