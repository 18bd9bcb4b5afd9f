//! Data models for books, genres, users and transactions.
//!
//! Public types here are the domain view used by screens. The `wire`
//! submodule holds the deserialisation targets that absorb the API's
//! envelope and numeric quirks before converting into these types.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

mod requests;
pub(crate) mod wire;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub(crate) use requests::BookPatch;
pub use requests::{BookPayload, CheckoutLine, CheckoutRequest, Credentials, Registration};

/// Raw identifier as sent by the API, which uses both numbers and strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl RawIdentifier {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Unsigned(value) => value.to_string(),
            Self::Signed(value) => value.to_string(),
        }
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier.
            #[must_use]
            pub const fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                RawIdentifier::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }
    };
}

identifier!(
    /// Book identifier.
    BookId
);
identifier!(
    /// Genre identifier (a UUID on current backends).
    GenreId
);
identifier!(
    /// Transaction (order) identifier.
    TransactionId
);
identifier!(
    /// User identifier.
    UserId
);

/// Physical condition tag attached to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookCondition {
    /// Unused copy.
    New,
    /// Second-hand copy.
    Used,
}

impl BookCondition {
    /// Parses a condition tag, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "used" => Some(Self::Used),
            _ => None,
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }
}

/// Book genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    /// Genre identifier.
    pub id: GenreId,
    /// Display name.
    pub name: String,
}

/// Book as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Book identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author.
    pub writer: String,
    /// Publisher, when known.
    pub publisher: Option<String>,
    /// Price in whole rupiah.
    pub price: u64,
    /// Copies in stock.
    pub stock: u32,
    /// Genre reference.
    pub genre: Option<Genre>,
    /// ISBN, when known.
    pub isbn: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Year of publication.
    pub publication_year: Option<u32>,
    /// Publication date as sent by the API (usually `YYYY-MM-DD`).
    pub publish_date: Option<String>,
    /// Condition tag.
    pub condition: Option<BookCondition>,
}

impl Book {
    /// Returns the genre identifier, if the book has a genre.
    #[must_use]
    pub fn genre_id(&self) -> Option<&GenreId> {
        self.genre.as_ref().map(|genre| &genre.id)
    }

    /// Returns the date the book was published.
    ///
    /// Falls back to 1 January of `publication_year` when no parseable
    /// publication date is present.
    #[must_use]
    pub fn published_on(&self) -> Option<NaiveDate> {
        self.publish_date
            .as_deref()
            .and_then(parse_date)
            .or_else(|| {
                self.publication_year
                    .and_then(|year| i32::try_from(year).ok())
                    .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            })
    }
}

/// Account details for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// User identifier, absent on some embedded references.
    pub id: Option<UserId>,
    /// Display name.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl User {
    /// Returns the best available display label for the user.
    #[must_use]
    pub fn label(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown buyer")
    }
}

/// Single line of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Purchased book.
    pub book_id: Option<BookId>,
    /// Book title at the time of sale, when the API embeds it.
    pub title: Option<String>,
    /// Number of copies.
    pub quantity: u32,
    /// Unit price at the time of sale.
    pub unit_price: u64,
}

impl OrderItem {
    /// Returns `quantity * unit_price`, saturating on overflow.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// A completed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction identifier.
    pub id: TransactionId,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Buyer reference.
    pub buyer: Option<User>,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Total amount charged.
    pub total_amount: u64,
}

impl Transaction {
    /// Returns the sum of unit prices and the line count used for the
    /// average book price.
    #[must_use]
    pub fn unit_price_totals(&self) -> (u64, u64) {
        let sum = self
            .items
            .iter()
            .fold(0_u64, |acc, item| acc.saturating_add(item.unit_price));
        let count = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
        (sum, count)
    }

    /// Returns the average unit price across lines, rounded down.
    #[must_use]
    pub fn average_unit_price(&self) -> u64 {
        let (sum, count) = self.unit_price_totals();
        sum.checked_div(count).unwrap_or(0)
    }
}

/// Parses a calendar date in `YYYY-MM-DD` or RFC 3339 form.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(trimmed).map(|stamp| stamp.date_naive()))
}

/// Parses a timestamp in RFC 3339 form, or a naive timestamp taken as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    fn book_with_dates(publish_date: Option<&str>, publication_year: Option<u32>) -> Book {
        Book {
            id: BookId::new("1"),
            title: "Dune".to_owned(),
            writer: "Frank Herbert".to_owned(),
            publisher: None,
            price: 180_000,
            stock: 8,
            genre: None,
            isbn: None,
            description: None,
            publication_year,
            publish_date: publish_date.map(ToOwned::to_owned),
            condition: None,
        }
    }

    #[test]
    fn identifiers_accept_numbers_and_strings() {
        let from_number: BookId = serde_json::from_str("42").expect("number should decode");
        let from_text: BookId = serde_json::from_str("\"42\"").expect("string should decode");
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "42");
    }

    #[rstest]
    #[case(Some("1965-06-01"), None, NaiveDate::from_ymd_opt(1965, 6, 1))]
    #[case(Some("2008-08-01T00:00:00Z"), None, NaiveDate::from_ymd_opt(2008, 8, 1))]
    #[case(Some("someday"), Some(1999), NaiveDate::from_ymd_opt(1999, 1, 1))]
    #[case(None, None, None)]
    fn published_on_prefers_date_then_year(
        #[case] publish_date: Option<&str>,
        #[case] year: Option<u32>,
        #[case] expected: Option<NaiveDate>,
    ) {
        assert_eq!(book_with_dates(publish_date, year).published_on(), expected);
    }

    #[rstest]
    #[case("NEW", Some(BookCondition::New))]
    #[case(" used ", Some(BookCondition::Used))]
    #[case("mint", None)]
    fn condition_parsing_is_forgiving(#[case] raw: &str, #[case] expected: Option<BookCondition>) {
        assert_eq!(BookCondition::parse(raw), expected);
    }

    #[test]
    fn average_unit_price_of_empty_order_is_zero() {
        let transaction = Transaction {
            id: TransactionId::new("t-1"),
            created_at: None,
            buyer: None,
            items: vec![],
            total_amount: 0,
        };
        assert_eq!(transaction.average_unit_price(), 0);
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let stamp = parse_timestamp("2025-01-02 03:04:05").expect("timestamp should parse");
        assert_eq!(stamp.to_rfc3339(), "2025-01-02T03:04:05+00:00");
    }
}
