//! Deserialisation targets for API responses.
//!
//! Responses arrive either bare or wrapped in `{"data": ...}`, and list
//! responses may nest their rows under `items`. Numbers may be integers,
//! fractions or numeric strings. Everything is normalised here so the rest
//! of the crate only sees the domain models.

use serde::Deserialize;

use super::{
    Book, BookCondition, BookId, Genre, GenreId, OrderItem, Transaction, TransactionId, User,
    UserId, parse_timestamp,
};

/// Optional `{"data": ...}` wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// List body: a plain array or an object carrying `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Rows(Vec<T>),
    Paged { items: Vec<T> },
}

impl<T> ListBody<T> {
    pub(crate) fn into_rows(self) -> Vec<T> {
        match self {
            Self::Rows(rows) | Self::Paged { items: rows } => rows,
        }
    }
}

/// Decodes a list response body into domain values.
pub(crate) fn decode_list<W, T>(body: &str) -> Result<Vec<T>, serde_json::Error>
where
    W: for<'de> Deserialize<'de> + Into<T>,
{
    let envelope: Envelope<ListBody<W>> = serde_json::from_str(body)?;
    Ok(envelope
        .into_inner()
        .into_rows()
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Decodes a single-resource response body into a domain value.
pub(crate) fn decode_one<W, T>(body: &str) -> Result<T, serde_json::Error>
where
    W: for<'de> Deserialize<'de> + Into<T>,
{
    let envelope: Envelope<W> = serde_json::from_str(body)?;
    Ok(envelope.into_inner().into())
}

/// Number as the API sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireNumber {
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl WireNumber {
    /// Converts to a whole non-negative number, rounding fractions.
    pub(crate) fn to_whole(&self) -> Option<u64> {
        match self {
            Self::Unsigned(value) => Some(*value),
            Self::Float(value) => round_non_negative(*value),
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed.parse::<u64>().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .and_then(round_non_negative)
                })
            }
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is checked finite and non-negative; oversized values saturate"
)]
fn round_non_negative(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}

fn whole(number: Option<&WireNumber>) -> u64 {
    number.and_then(WireNumber::to_whole).unwrap_or(0)
}

fn whole_u32(number: Option<&WireNumber>) -> u32 {
    u32::try_from(whole(number)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiGenre {
    id: Option<GenreId>,
    #[serde(alias = "genre_name")]
    name: Option<String>,
}

impl ApiGenre {
    fn into_genre(self, fallback_id: Option<GenreId>) -> Option<Genre> {
        let id = self.id.or(fallback_id)?;
        Some(Genre {
            id,
            name: self.name.unwrap_or_else(|| "-".to_owned()),
        })
    }
}

impl From<ApiGenre> for Option<Genre> {
    fn from(api: ApiGenre) -> Self {
        api.into_genre(None)
    }
}

/// Genre list rows; entries without an identifier are dropped.
pub(crate) fn genres_from_rows(rows: Vec<Option<Genre>>) -> Vec<Genre> {
    rows.into_iter().flatten().collect()
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiBook {
    id: BookId,
    title: Option<String>,
    writer: Option<String>,
    publisher: Option<String>,
    price: Option<WireNumber>,
    #[serde(alias = "stock")]
    stock_quantity: Option<WireNumber>,
    genre: Option<ApiGenre>,
    genre_id: Option<GenreId>,
    genre_name: Option<String>,
    isbn: Option<String>,
    description: Option<String>,
    publication_year: Option<WireNumber>,
    #[serde(alias = "publication_date")]
    publish_date: Option<String>,
    condition: Option<String>,
}

impl From<ApiBook> for Book {
    fn from(api: ApiBook) -> Self {
        let genre = api
            .genre
            .and_then(|embedded| embedded.into_genre(api.genre_id.clone()))
            .or_else(|| {
                api.genre_id.map(|id| Genre {
                    id,
                    name: api.genre_name.unwrap_or_else(|| "-".to_owned()),
                })
            });

        Self {
            id: api.id,
            title: api.title.unwrap_or_default(),
            writer: api.writer.unwrap_or_default(),
            publisher: non_blank(api.publisher),
            price: whole(api.price.as_ref()),
            stock: whole_u32(api.stock_quantity.as_ref()),
            genre,
            isbn: non_blank(api.isbn),
            description: non_blank(api.description),
            publication_year: api
                .publication_year
                .as_ref()
                .and_then(WireNumber::to_whole)
                .and_then(|year| u32::try_from(year).ok()),
            publish_date: non_blank(api.publish_date),
            condition: api.condition.as_deref().and_then(BookCondition::parse),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    id: Option<UserId>,
    #[serde(alias = "name")]
    username: Option<String>,
    email: Option<String>,
}

impl From<ApiUser> for User {
    fn from(api: ApiUser) -> Self {
        Self {
            id: api.id,
            username: non_blank(api.username),
            email: non_blank(api.email),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiBookReference {
    id: Option<BookId>,
    title: Option<String>,
    price: Option<WireNumber>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiOrderItem {
    book_id: Option<BookId>,
    quantity: Option<WireNumber>,
    price: Option<WireNumber>,
    book: Option<ApiBookReference>,
}

impl From<ApiOrderItem> for OrderItem {
    fn from(api: ApiOrderItem) -> Self {
        let (reference_id, title, reference_price) = api
            .book
            .map_or((None, None, None), |book| (book.id, book.title, book.price));
        let unit_price = api
            .price
            .as_ref()
            .or(reference_price.as_ref())
            .and_then(WireNumber::to_whole)
            .unwrap_or(0);

        Self {
            book_id: api.book_id.or(reference_id),
            title,
            quantity: whole_u32(api.quantity.as_ref()),
            unit_price,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiTransaction {
    id: TransactionId,
    created_at: Option<String>,
    user: Option<ApiUser>,
    user_id: Option<UserId>,
    #[serde(alias = "order_items")]
    items: Option<Vec<ApiOrderItem>>,
    #[serde(alias = "totalAmount")]
    total_amount: Option<WireNumber>,
}

impl From<ApiTransaction> for Transaction {
    fn from(api: ApiTransaction) -> Self {
        let items: Vec<OrderItem> = api
            .items
            .unwrap_or_default()
            .into_iter()
            .map(OrderItem::from)
            .collect();
        let total_amount = api
            .total_amount
            .as_ref()
            .and_then(WireNumber::to_whole)
            .unwrap_or_else(|| {
                items
                    .iter()
                    .fold(0_u64, |acc, item| acc.saturating_add(item.line_total()))
            });
        let buyer = match (api.user, api.user_id) {
            (Some(user), fallback_id) => {
                let mut buyer = User::from(user);
                buyer.id = buyer.id.or(fallback_id);
                Some(buyer)
            }
            (None, Some(id)) => Some(User {
                id: Some(id),
                ..User::default()
            }),
            (None, None) => None,
        };

        Self {
            id: api.id,
            created_at: api.created_at.as_deref().and_then(parse_timestamp),
            buyer,
            items,
            total_amount,
        }
    }
}

/// Token returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiAuthToken {
    #[serde(alias = "access_token")]
    pub(crate) token: String,
}

impl From<ApiAuthToken> for String {
    fn from(api: ApiAuthToken) -> Self {
        api.token
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIdOnly {
    id: TransactionId,
}

/// Body of a successful `POST /transactions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiCreatedTransaction {
    Nested { order: ApiIdOnly },
    Flat(ApiIdOnly),
}

impl From<ApiCreatedTransaction> for TransactionId {
    fn from(api: ApiCreatedTransaction) -> Self {
        match api {
            ApiCreatedTransaction::Nested { order } | ApiCreatedTransaction::Flat(order) => {
                order.id
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
