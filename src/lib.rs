//! litshop: a command-line client for the IT Literature Shop bookstore API.
//!
//! Screens are *navigable locations* such as `/books?q=dune&page=2`. List
//! screens keep their filter, sort and page state in the location's query
//! parameters; [`view::ListViewSynchronizer`] derives from them what to
//! fetch from the API and which slice of the fetched data is visible, and
//! discards responses that arrive for superseded parameters.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod format;
pub mod routes;
pub mod session;
pub mod telemetry;
pub mod transactions;
pub mod view;

pub use api::{
    ApiBase, AuthGateway, BearerToken, Book, BookGateway, BookId, ClientError, Genre, GenreId,
    HttpGateway, Transaction, TransactionGateway, TransactionId, User, UserId,
};
pub use catalog::{BookCatalog, BookForm};
pub use config::LitshopConfig;
pub use routes::Route;
pub use session::{SessionState, SessionStore};
pub use transactions::{Cart, TransactionList};
pub use view::{History, ListView, ListViewSynchronizer, Location, ViewQuery};
