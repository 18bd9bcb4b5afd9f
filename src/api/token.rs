//! Bearer token wrapper and API base URL parsing.

use url::Url;

use super::error::ClientError;

/// Default API location used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Bearer token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ClientError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ClientError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Base URL of the bookstore API.
///
/// The stored URL always ends with a slash so that relative endpoint paths
/// join beneath any path prefix (e.g. `https://host/api/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parses an API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the value is not an
    /// absolute `http` or `https` URL.
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let mut url = Url::parse(input.trim()).map_err(|error| ClientError::Configuration {
            message: format!("API URL '{input}' is invalid: {error}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration {
                message: format!("API URL '{input}' must use http or https"),
            });
        }

        if !url.path().ends_with('/') {
            let with_slash = format!("{}/", url.path());
            url.set_path(&with_slash);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self(url))
    }

    /// Resolves an endpoint beneath the base from its path segments.
    ///
    /// Each segment is percent-encoded, so identifiers never escape their
    /// position in the path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] when the base cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.0.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidRoute(format!("{} cannot hold a path", self.0)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Borrow the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}
