//! Gateways for calling the bookstore REST API.
//!
//! Each resource family sits behind its own trait so screens depend only on
//! what they call and tests can substitute mocks. [`HttpGateway`] implements
//! all of them over `reqwest`.

mod auth;
mod books;
mod client;
mod error_mapping;
mod http_utils;
mod transactions;

pub use client::HttpGateway;

use async_trait::async_trait;

use crate::api::error::ClientError;
use crate::api::models::{
    Book, BookId, BookPayload, CheckoutRequest, Credentials, Genre, GenreId, Registration,
    Transaction, TransactionId, User,
};
use crate::api::token::BearerToken;

/// Server-side scope of a book listing.
///
/// With a genre the listing is served by `GET /books/genre/{id}`, otherwise
/// by `GET /books`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    /// Restricts the listing to one genre.
    pub genre: Option<GenreId>,
}

/// Server-side scope of a transaction listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Free-text search forwarded as the `search` query parameter.
    pub search: Option<String>,
}

/// Gateway for account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<BearerToken, ClientError>;

    /// Creates an account.
    async fn register(&self, registration: &Registration) -> Result<(), ClientError>;

    /// Fetches the account that owns the current token.
    async fn current_user(&self) -> Result<User, ClientError>;
}

/// Gateway for the book catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookGateway: Send + Sync {
    /// Lists books within the given scope.
    async fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, ClientError>;

    /// Fetches a single book.
    async fn book(&self, id: &BookId) -> Result<Book, ClientError>;

    /// Creates a book.
    async fn create_book(&self, payload: &BookPayload) -> Result<(), ClientError>;

    /// Updates a book.
    async fn update_book(&self, id: &BookId, payload: &BookPayload) -> Result<(), ClientError>;

    /// Deletes a book.
    async fn delete_book(&self, id: &BookId) -> Result<(), ClientError>;

    /// Lists the genres available for filtering and forms.
    async fn list_genres(&self) -> Result<Vec<Genre>, ClientError>;
}

/// Gateway for orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Lists transactions within the given scope.
    async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ClientError>;

    /// Fetches a single transaction.
    async fn transaction(&self, id: &TransactionId) -> Result<Transaction, ClientError>;

    /// Places an order and returns the new transaction identifier.
    async fn create_transaction(
        &self,
        order: &CheckoutRequest,
    ) -> Result<TransactionId, ClientError>;
}
