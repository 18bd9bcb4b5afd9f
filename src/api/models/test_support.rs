//! Builders for book, genre and transaction fixtures.
//!
//! # Examples
//!
//! ```
//! use litshop::api::models::test_support::numbered_books;
//!
//! let books = numbered_books(15);
//! assert_eq!(books.len(), 15);
//! assert_eq!(books.first().map(|book| book.title.as_str()), Some("Book 01"));
//! ```

use super::{
    Book, BookCondition, BookId, Genre, GenreId, OrderItem, Transaction, TransactionId, User,
    UserId,
};

/// Genre used by default in fixtures.
#[must_use]
pub fn technology() -> Genre {
    genre("g-tech", "Technology")
}

/// Builds a genre.
#[must_use]
pub fn genre(id: &str, name: &str) -> Genre {
    Genre {
        id: GenreId::new(id),
        name: name.to_owned(),
    }
}

/// Builds a book with the given id, title and writer in the technology genre.
#[must_use]
pub fn book(id: &str, title: &str, writer: &str) -> Book {
    Book {
        id: BookId::new(id),
        title: title.to_owned(),
        writer: writer.to_owned(),
        publisher: None,
        price: 100_000,
        stock: 10,
        genre: Some(technology()),
        isbn: None,
        description: None,
        publication_year: None,
        publish_date: None,
        condition: Some(BookCondition::New),
    }
}

/// Builds `count` books titled `Book 01`, `Book 02`, ... with ids `1..=count`.
#[must_use]
pub fn numbered_books(count: u32) -> Vec<Book> {
    (1..=count)
        .map(|index| {
            book(
                &index.to_string(),
                &format!("Book {index:02}"),
                &format!("Writer {index:02}"),
            )
        })
        .collect()
}

/// Builds a transaction with a single line.
#[must_use]
pub fn transaction(id: &str, quantity: u32, unit_price: u64) -> Transaction {
    let item = OrderItem {
        book_id: Some(BookId::new("1")),
        title: Some("Book 01".to_owned()),
        quantity,
        unit_price,
    };
    Transaction {
        id: TransactionId::new(id),
        created_at: None,
        buyer: Some(User {
            id: Some(UserId::new("u-1")),
            username: Some("reader".to_owned()),
            email: None,
        }),
        total_amount: item.line_total(),
        items: vec![item],
    }
}
