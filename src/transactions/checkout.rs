//! Checkout cart built from the `items` query parameter.
//!
//! The cart is written as `items=<bookId>:<qty>,<bookId>:<qty>`. It is
//! priced against the current catalog, checked against stock and turned
//! into a `POST /transactions` body.

use std::collections::BTreeMap;

use crate::api::{Book, BookId, CheckoutLine, CheckoutRequest, ClientError, UserId};
use crate::view::ViewQuery;

/// Parameter holding the cart.
pub const ITEMS_PARAM: &str = "items";

/// Requested quantity of one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Book to buy.
    pub book_id: BookId,
    /// Copies requested; always positive.
    pub quantity: u32,
}

/// Books the user intends to buy, in first-mention order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Reads the cart from the location's `items` parameter.
    ///
    /// Repeated books are merged and zero quantities dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for entries that are not
    /// `id:quantity` with a non-negative integer quantity.
    pub fn from_query(query: &ViewQuery) -> Result<Self, ClientError> {
        query.get(ITEMS_PARAM).map_or_else(|| Ok(Self::default()), Self::parse)
    }

    /// Parses `id:qty,id:qty`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for malformed entries.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let mut cart = Self::default();
        for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (id, quantity) = entry.split_once(':').ok_or_else(|| {
                ClientError::validation(ITEMS_PARAM, &format!("'{entry}' is not id:quantity"))
            })?;
            let book_id = id.trim();
            if book_id.is_empty() {
                return Err(ClientError::validation(
                    ITEMS_PARAM,
                    &format!("'{entry}' has no book id"),
                ));
            }
            let count = quantity.trim().parse::<u32>().map_err(|_| {
                ClientError::validation(
                    ITEMS_PARAM,
                    &format!("quantity in '{entry}' must be a non-negative integer"),
                )
            })?;
            cart.add(BookId::new(book_id), count);
        }
        Ok(cart)
    }

    /// Adds copies of a book; zero is ignored.
    pub fn add(&mut self, book_id: BookId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.book_id == book_id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { book_id, quantity });
        }
    }

    /// Returns the cart lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns true when nothing is in the cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialises the cart back to its `items` form.
    #[must_use]
    pub fn to_param(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}:{}", line.book_id, line.quantity))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Prices the cart against `books`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when a book is unknown, a
    /// quantity exceeds stock, or the subtotal is zero.
    pub fn price(&self, books: &[Book]) -> Result<PricedCart, ClientError> {
        let catalog: BTreeMap<&BookId, &Book> = books.iter().map(|book| (&book.id, book)).collect();
        let mut lines = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let book = catalog.get(&line.book_id).copied().ok_or_else(|| {
                ClientError::validation(ITEMS_PARAM, &format!("book {} does not exist", line.book_id))
            })?;
            if line.quantity > book.stock {
                return Err(ClientError::validation(
                    ITEMS_PARAM,
                    &format!(
                        "only {} of '{}' in stock, {} requested",
                        book.stock, book.title, line.quantity
                    ),
                ));
            }
            lines.push(PricedLine {
                book: book.clone(),
                quantity: line.quantity,
            });
        }

        let subtotal = lines
            .iter()
            .fold(0_u64, |sum, line| sum.saturating_add(line.line_total()));
        if subtotal == 0 {
            return Err(ClientError::validation(
                ITEMS_PARAM,
                "choose at least one book before checking out",
            ));
        }
        Ok(PricedCart { lines, subtotal })
    }
}

/// Cart line with its book details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// Book being bought.
    pub book: Book,
    /// Copies.
    pub quantity: u32,
}

impl PricedLine {
    /// Returns `price * quantity`, saturating on overflow.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.book.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Validated cart ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCart {
    /// Lines in cart order.
    pub lines: Vec<PricedLine>,
    /// Sum of line totals; always positive.
    pub subtotal: u64,
}

impl PricedCart {
    /// Builds the order body for `user_id`.
    #[must_use]
    pub fn to_request(&self, user_id: UserId) -> CheckoutRequest {
        CheckoutRequest {
            user_id,
            items: self
                .lines
                .iter()
                .map(|line| CheckoutLine {
                    book_id: line.book.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::Cart;
    use crate::api::models::test_support::book;
    use crate::api::{Book, BookId, ClientError, UserId};
    use crate::view::ViewQuery;

    #[fixture]
    fn shelf() -> Vec<Book> {
        let mut dune = book("1", "Dune", "Frank Herbert");
        dune.price = 150_000;
        dune.stock = 3;
        let mut emma = book("2", "Emma", "Jane Austen");
        emma.price = 80_000;
        emma.stock = 1;
        let mut free = book("3", "Leaflet", "Anonymous");
        free.price = 0;
        vec![dune, emma, free]
    }

    #[test]
    fn parse_merges_repeats_and_drops_zero() {
        let cart = Cart::parse("1:2, 2:0,1:1,").expect("cart should parse");
        assert_eq!(cart.to_param(), "1:3");
    }

    #[test]
    fn missing_parameter_is_an_empty_cart() {
        let cart = Cart::from_query(&ViewQuery::parse("page=1")).expect("cart should parse");
        assert!(cart.is_empty());
    }

    #[rstest]
    #[case("1")]
    #[case(":2")]
    #[case("1:-1")]
    #[case("1:two")]
    fn malformed_entries_are_rejected(#[case] raw: &str) {
        assert!(matches!(
            Cart::parse(raw),
            Err(ClientError::Validation { .. })
        ));
    }

    #[rstest]
    fn priced_cart_totals_and_builds_request(shelf: Vec<Book>) {
        let cart = Cart::parse("1:2,2:1").expect("cart should parse");
        let priced = cart.price(&shelf).expect("cart should price");
        assert_eq!(priced.subtotal, 380_000);

        let request = priced.to_request(UserId::new("u-9"));
        assert_eq!(request.user_id, UserId::new("u-9"));
        let quantities: Vec<(BookId, u32)> = request
            .items
            .into_iter()
            .map(|line| (line.book_id, line.quantity))
            .collect();
        assert_eq!(
            quantities,
            vec![(BookId::new("1"), 2), (BookId::new("2"), 1)]
        );
    }

    #[rstest]
    #[case("2:2", "in stock")]
    #[case("9:1", "does not exist")]
    #[case("3:4", "at least one book")]
    #[case("", "at least one book")]
    fn invalid_carts_are_rejected(shelf: Vec<Book>, #[case] raw: &str, #[case] reason: &str) {
        let cart = Cart::parse(raw).expect("cart should parse");
        let result = cart.price(&shelf);
        assert!(
            matches!(&result, Err(ClientError::Validation { message, .. }) if message.contains(reason)),
            "expected '{reason}', got {result:?}"
        );
    }
}
