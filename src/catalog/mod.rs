//! Book catalog screen: list parameters, filtering and ordering.
//!
//! The catalog is fetched per genre (the server-side scope) and then
//! searched, filtered by condition, sorted and paged on the client.

pub mod form;

use std::cmp::Ordering;

use crate::api::{Book, BookCondition, BookQuery, GenreId};
use crate::view::query::{SEARCH_PARAM, SORT_BY_PARAM};
use crate::view::sorting::{compare_dates, compare_text, contains_ignoring_case};
use crate::view::{ListView, ViewQuery};

pub use form::BookForm;

/// Parameter holding the genre filter.
pub const GENRE_PARAM: &str = "genreId";
/// Parameter holding the condition filter.
pub const CONDITION_PARAM: &str = "condition";
/// Page size used when the location does not set `pageSize`.
pub const DEFAULT_BOOK_PAGE_SIZE: u32 = 5;

/// Field the catalog is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookSortField {
    /// Title, case-insensitive.
    #[default]
    Title,
    /// Writer, case-insensitive.
    Writer,
    /// Price.
    Price,
    /// Publication date; books without one sort first.
    PublishDate,
}

impl BookSortField {
    /// Parses a `sortBy` value; unknown values fall back to the title.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("writer") => Self::Writer,
            Some("price") => Self::Price,
            Some("publish_date") => Self::PublishDate,
            _ => Self::Title,
        }
    }

    /// Returns the query-parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Writer => "writer",
            Self::Price => "price",
            Self::PublishDate => "publish_date",
        }
    }
}

/// Catalog parameters read from the location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookListParams {
    /// Substring matched against title and writer.
    pub search: Option<String>,
    /// Genre filter; also selects the genre endpoint.
    pub genre: Option<GenreId>,
    /// Condition filter. Unrecognised values are ignored.
    pub condition: Option<BookCondition>,
    /// Sort field.
    pub sort: BookSortField,
}

/// The `/books` list view.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookCatalog;

impl ListView for BookCatalog {
    type Item = Book;
    type Params = BookListParams;
    type Scope = BookQuery;

    fn name(&self) -> &'static str {
        "books"
    }

    fn default_page_size(&self) -> u32 {
        DEFAULT_BOOK_PAGE_SIZE
    }

    fn params(&self, query: &ViewQuery) -> BookListParams {
        BookListParams {
            search: query.text(SEARCH_PARAM).map(ToOwned::to_owned),
            genre: query.text(GENRE_PARAM).map(GenreId::new),
            condition: query.text(CONDITION_PARAM).and_then(BookCondition::parse),
            sort: BookSortField::parse(query.get(SORT_BY_PARAM)),
        }
    }

    fn scope(&self, params: &BookListParams) -> BookQuery {
        BookQuery {
            genre: params.genre.clone(),
        }
    }

    fn matches(&self, params: &BookListParams, book: &Book) -> bool {
        let search_matches = params.search.as_deref().is_none_or(|term| {
            contains_ignoring_case(&book.title, term) || contains_ignoring_case(&book.writer, term)
        });
        // Genre endpoints may omit the embedded genre; only a different
        // genre excludes a book.
        let genre_matches = params
            .genre
            .as_ref()
            .is_none_or(|wanted| book.genre_id().is_none_or(|actual| actual == wanted));
        let condition_matches = params
            .condition
            .is_none_or(|wanted| book.condition == Some(wanted));
        search_matches && genre_matches && condition_matches
    }

    fn compare(&self, params: &BookListParams, left: &Book, right: &Book) -> Ordering {
        match params.sort {
            BookSortField::Title => compare_text(&left.title, &right.title),
            BookSortField::Writer => compare_text(&left.writer, &right.writer),
            BookSortField::Price => left.price.cmp(&right.price),
            BookSortField::PublishDate => compare_dates(left.published_on(), right.published_on()),
        }
    }
}
