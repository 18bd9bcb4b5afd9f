//! Typed access to the bookstore REST API.
//!
//! The module validates tokens and base URLs, decodes the API's loosely
//! shaped responses into domain models and exposes trait-based gateways so
//! that screens can be tested against mocks.

pub mod error;
pub mod gateway;
pub mod models;
pub mod token;

pub use error::ClientError;
pub use gateway::{
    AuthGateway, BookGateway, BookQuery, HttpGateway, TransactionGateway, TransactionQuery,
};
pub use models::{
    Book, BookCondition, BookId, BookPayload, CheckoutLine, CheckoutRequest, Credentials, Genre,
    GenreId, OrderItem, Registration, Transaction, TransactionId, User, UserId,
};
pub use token::{ApiBase, BearerToken, DEFAULT_API_URL};
