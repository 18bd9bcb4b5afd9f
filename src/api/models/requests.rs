//! Request bodies sent to the bookstore API.

use serde::Serialize;

use super::{BookCondition, BookId, GenreId, UserId};

/// Login credentials for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Account details for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Optional display name; omitted from the body when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Validated book fields for `POST /books` and `PATCH /books/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPayload {
    /// Title.
    pub title: String,
    /// Author.
    pub writer: String,
    /// Publisher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Price in whole rupiah.
    pub price: u64,
    /// Copies in stock.
    pub stock_quantity: u32,
    /// Genre reference.
    pub genre_id: GenreId,
    /// ISBN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Year of publication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<u32>,
    /// Condition tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<BookCondition>,
}

/// Body of `PATCH /books/{id}`.
///
/// Empty optional fields are sent as `null` so that the server clears them.
#[derive(Debug, Serialize)]
pub(crate) struct BookPatch<'a> {
    title: &'a str,
    writer: &'a str,
    publisher: Option<&'a str>,
    price: u64,
    stock_quantity: u32,
    genre_id: &'a GenreId,
    isbn: Option<&'a str>,
    description: Option<&'a str>,
    publication_year: Option<u32>,
    condition: Option<BookCondition>,
}

impl<'a> From<&'a BookPayload> for BookPatch<'a> {
    fn from(payload: &'a BookPayload) -> Self {
        Self {
            title: &payload.title,
            writer: &payload.writer,
            publisher: payload.publisher.as_deref(),
            price: payload.price,
            stock_quantity: payload.stock_quantity,
            genre_id: &payload.genre_id,
            isbn: payload.isbn.as_deref(),
            description: payload.description.as_deref(),
            publication_year: payload.publication_year,
            condition: payload.condition,
        }
    }
}

/// One line of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    /// Book being purchased.
    pub book_id: BookId,
    /// Number of copies.
    pub quantity: u32,
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    /// Buyer.
    pub user_id: UserId,
    /// Lines with a positive quantity.
    pub items: Vec<CheckoutLine>,
}
