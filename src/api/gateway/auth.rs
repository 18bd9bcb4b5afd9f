//! Login, registration and account lookup endpoints.

use async_trait::async_trait;
use http::Method;

use super::AuthGateway;
use super::client::{Access, HttpGateway};
use super::error_mapping::map_decode_error;
use crate::api::error::ClientError;
use crate::api::models::wire::{ApiAuthToken, ApiUser, decode_one};
use crate::api::models::{Credentials, Registration, User};
use crate::api::token::BearerToken;

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<BearerToken, ClientError> {
        const OPERATION: &str = "POST /auth/login";
        let body = self
            .send(
                Method::POST,
                &["auth", "login"],
                Access::Anonymous,
                Some(credentials),
            )
            .await?;
        let token: String = decode_one::<ApiAuthToken, String>(&body)
            .map_err(|error| map_decode_error(OPERATION, &error))?;
        BearerToken::new(token).map_err(|_| ClientError::Api {
            message: format!("{OPERATION} returned a blank token"),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        self.send(
            Method::POST,
            &["auth", "register"],
            Access::Anonymous,
            Some(registration),
        )
        .await
        .map(drop)
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.fetch(&["auth", "me"], &[], decode_one::<ApiUser, User>)
            .await
    }
}
