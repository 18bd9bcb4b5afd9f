//! Application routes and the authentication guard.

use std::fmt;

use crate::api::{BookId, TransactionId};

/// A screen the client can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page.
    Home,
    /// Login form.
    Login,
    /// Registration form.
    Register,
    /// Clears the stored session.
    Logout,
    /// Book catalog.
    Books,
    /// New book form.
    AddBook,
    /// Single book.
    BookDetail(BookId),
    /// Edit form for one book.
    EditBook(BookId),
    /// Transaction list.
    Transactions,
    /// Checkout cart.
    Checkout,
    /// Single transaction.
    TransactionDetail(TransactionId),
    /// Anything else.
    NotFound(String),
}

impl Route {
    /// Resolves a location path. Literal segments win over identifiers, so
    /// `/books/add` is never read as a book id.
    ///
    /// # Examples
    ///
    /// ```
    /// use litshop::routes::Route;
    ///
    /// assert_eq!(Route::parse("/transactions/checkout"), Route::Checkout);
    /// assert!(matches!(Route::parse("/books/12/edit"), Route::EditBook(_)));
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["logout"] => Self::Logout,
            ["books"] => Self::Books,
            ["books", "add"] => Self::AddBook,
            ["books", id] => Self::BookDetail(BookId::new(*id)),
            ["books", id, "edit"] => Self::EditBook(BookId::new(*id)),
            ["transactions"] => Self::Transactions,
            ["transactions", "checkout"] => Self::Checkout,
            ["transactions", id] => Self::TransactionDetail(TransactionId::new(*id)),
            _ => Self::NotFound(path.to_owned()),
        }
    }

    /// Returns true for screens that need a signed-in user.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Books
                | Self::AddBook
                | Self::BookDetail(_)
                | Self::EditBook(_)
                | Self::Transactions
                | Self::Checkout
                | Self::TransactionDetail(_)
        )
    }

    /// Returns true for screens only shown to signed-out users.
    #[must_use]
    pub const fn is_guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Returns where the guard sends this route, if anywhere.
    #[must_use]
    pub const fn redirect(&self, signed_in: bool) -> Option<Self> {
        if self.requires_auth() && !signed_in {
            Some(Self::Login)
        } else if self.is_guest_only() && signed_in {
            Some(Self::Books)
        } else {
            None
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Login => f.write_str("/login"),
            Self::Register => f.write_str("/register"),
            Self::Logout => f.write_str("/logout"),
            Self::Books => f.write_str("/books"),
            Self::AddBook => f.write_str("/books/add"),
            Self::BookDetail(id) => write!(f, "/books/{id}"),
            Self::EditBook(id) => write!(f, "/books/{id}/edit"),
            Self::Transactions => f.write_str("/transactions"),
            Self::Checkout => f.write_str("/transactions/checkout"),
            Self::TransactionDetail(id) => write!(f, "/transactions/{id}"),
            Self::NotFound(path) => f.write_str(path),
        }
    }
}
