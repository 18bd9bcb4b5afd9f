//! Navigable locations and the history stack that records them.

use std::fmt;
use std::mem;

use super::query::ViewQuery;
use crate::api::ClientError;

/// A path plus query parameters, equivalent to a browser URL within the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: ViewQuery,
}

impl Location {
    /// Parses `/path?query`. Fragments are dropped and trailing slashes
    /// removed (except for the root path).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] when the input is not an
    /// absolute path.
    ///
    /// # Examples
    ///
    /// ```
    /// use litshop::view::Location;
    ///
    /// let location = Location::parse("/books/?q=dune#top").expect("location");
    /// assert_eq!(location.path(), "/books");
    /// assert_eq!(location.to_string(), "/books?q=dune");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let trimmed = raw.trim();
        let without_fragment = trimmed
            .split_once('#')
            .map_or(trimmed, |(before, _)| before);
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        if !path.starts_with('/') {
            return Err(ClientError::InvalidRoute(format!(
                "'{raw}' must start with '/'"
            )));
        }

        Ok(Self {
            path: normalise_path(path),
            query: ViewQuery::parse(query),
        })
    }

    /// Builds a location for `path` with no query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] when `path` is not absolute.
    pub fn at(path: &str) -> Result<Self, ClientError> {
        Self::parse(path).map(|location| location.with_query(ViewQuery::default()))
    }

    /// Returns the same path with a different query.
    #[must_use]
    pub fn with_query(self, query: ViewQuery) -> Self {
        Self {
            path: self.path,
            query,
        }
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn query(&self) -> &ViewQuery {
        &self.query
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query.to_query_string())
        }
    }
}

fn normalise_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Navigation history with back and forward stacks.
///
/// Route changes [`push`](Self::push) a new entry; parameter updates
/// [`replace`](Self::replace) the current one, so back and forward only
/// walk between routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    current: Location,
    back: Vec<Location>,
    forward: Vec<Location>,
}

impl History {
    /// Starts a history at `initial`.
    #[must_use]
    pub const fn new(initial: Location) -> Self {
        Self {
            current: initial,
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    /// Returns the current location.
    #[must_use]
    pub const fn current(&self) -> &Location {
        &self.current
    }

    /// Navigates to `location`, discarding any forward entries.
    pub fn push(&mut self, location: Location) {
        let previous = mem::replace(&mut self.current, location);
        self.back.push(previous);
        self.forward.clear();
    }

    /// Replaces the current entry without adding to the history.
    pub fn replace(&mut self, location: Location) {
        self.current = location;
    }

    /// Moves one entry back. Returns `None` at the oldest entry.
    pub fn back(&mut self) -> Option<&Location> {
        let previous = self.back.pop()?;
        let current = mem::replace(&mut self.current, previous);
        self.forward.push(current);
        Some(&self.current)
    }

    /// Moves one entry forward. Returns `None` at the newest entry.
    pub fn forward(&mut self) -> Option<&Location> {
        let next = self.forward.pop()?;
        let current = mem::replace(&mut self.current, next);
        self.back.push(current);
        Some(&self.current)
    }

    /// Number of entries, including the current one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.back.len().saturating_add(self.forward.len()).saturating_add(1)
    }

    /// Always false: a history holds at least the current entry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
