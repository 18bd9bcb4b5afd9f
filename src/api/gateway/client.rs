//! `reqwest`-backed gateway shared by every resource family.

use std::time::Duration;

use http::Method;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;

use super::error_mapping::{map_decode_error, map_http_error, map_transport_error};
use super::http_utils::extract_api_message;
use crate::api::error::ClientError;
use crate::api::token::{ApiBase, BearerToken};

/// Whether a request must carry the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Access {
    /// Sent without credentials (login and registration).
    Anonymous,
    /// Requires the bearer token; fails before any network call without one.
    Bearer,
}

/// HTTP gateway for the bookstore API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: ApiBase,
    token: Option<BearerToken>,
}

impl HttpGateway {
    /// Creates a gateway for `base`, optionally authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(
        base: ApiBase,
        token: Option<BearerToken>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ClientError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self {
            client,
            base,
            token,
        })
    }

    /// Returns the API base this gateway talks to.
    #[must_use]
    pub const fn base(&self) -> &ApiBase {
        &self.base
    }

    /// Sends a request and returns the body of a successful response.
    pub(super) async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        access: Access,
        payload: Option<&B>,
    ) -> Result<String, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let operation = format!("{method} /{}", segments.join("/"));
        let mut builder = self.prepare(method, segments, access)?;
        if let Some(body) = payload {
            builder = builder.json(body);
        }
        execute(&operation, builder).await
    }

    /// Sends a body-less request, decoding the response with `decode`.
    pub(super) async fn fetch<T>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        decode: fn(&str) -> Result<T, serde_json::Error>,
    ) -> Result<T, ClientError> {
        let operation = format!("GET /{}", segments.join("/"));
        let mut builder = self.prepare(Method::GET, segments, Access::Bearer)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let body = execute(&operation, builder).await?;
        decode(&body).map_err(|error| map_decode_error(&operation, &error))
    }

    fn prepare(
        &self,
        method: Method,
        segments: &[&str],
        access: Access,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self.base.endpoint(segments)?;
        let mut builder = self.client.request(method, url);
        if access == Access::Bearer {
            let token = self.token.as_ref().ok_or(ClientError::MissingToken)?;
            builder = builder.bearer_auth(token.value());
        }
        Ok(builder)
    }
}

async fn execute(operation: &str, builder: RequestBuilder) -> Result<String, ClientError> {
    debug!(operation, "sending bookstore request");
    let response = builder
        .send()
        .await
        .map_err(|error| map_transport_error(operation, &error))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| map_transport_error(operation, &error))?;

    if status.is_success() {
        debug!(operation, status = status.as_u16(), "bookstore request succeeded");
        return Ok(body);
    }

    debug!(operation, status = status.as_u16(), "bookstore request failed");
    Err(map_http_error(operation, status, extract_api_message(&body)))
}
