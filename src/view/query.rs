//! Named query parameters carried by a navigable location.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::api::ClientError;

/// Parameter holding the 1-based page number.
pub const PAGE_PARAM: &str = "page";
/// Parameter holding the page size.
pub const PAGE_SIZE_PARAM: &str = "pageSize";
/// Parameter holding the sort field.
pub const SORT_BY_PARAM: &str = "sortBy";
/// Parameter holding the sort direction.
pub const ORDER_PARAM: &str = "order";
/// Parameter holding the free-text search term.
pub const SEARCH_PARAM: &str = "q";

/// Largest page size a location may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Mapping of query-parameter name to value.
///
/// Keys are kept sorted so that the serialised form of equal queries is
/// identical. Empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery(BTreeMap<String, String>);

impl ViewQuery {
    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored. When a key repeats, the last value wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use litshop::view::ViewQuery;
    ///
    /// let query = ViewQuery::parse("?q=dune&page=2&genreId=");
    /// assert_eq!(query.get("q"), Some("dune"));
    /// assert_eq!(query.get("genreId"), None);
    /// assert_eq!(query.to_query_string(), "page=2&q=dune");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(trimmed.as_bytes()) {
            query.insert(&key, &value);
        }
        query
    }

    /// Returns the value of `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true when no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies a user-driven parameter update.
    ///
    /// An empty value removes the parameter. Any update to a parameter other
    /// than `page` resets the page to `"1"`.
    pub fn set_param(&mut self, key: &str, value: &str) {
        self.insert(key, value);
        if key != PAGE_PARAM {
            self.insert(PAGE_PARAM, "1");
        }
    }

    /// Serialises the parameters in key order.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    /// Returns the 1-based page number; missing, invalid or zero values read
    /// as page 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.positive(PAGE_PARAM).unwrap_or(1)
    }

    /// Returns the page size, falling back to `default` for missing, invalid
    /// or zero values and clamping to [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn page_size(&self, default: u32) -> u32 {
        self.positive(PAGE_SIZE_PARAM)
            .unwrap_or(default)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Returns the trimmed, non-empty value of `key`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|value| !value.is_empty())
    }

    fn positive(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|value| *value > 0)
    }

    /// Sets `key` without touching the page. An empty value removes it.
    pub fn insert(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_owned(), value.to_owned());
        }
    }
}

/// A single `key=value` parameter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamUpdate {
    /// Parameter name.
    pub key: String,
    /// New value; empty removes the parameter.
    pub value: String,
}

impl ParamUpdate {
    /// Parses one form-encoded `key=value` pair. The value may be empty
    /// (`genreId=`); `+` and percent escapes are decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] when there is no `=` or the key
    /// is blank.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        if !raw.contains('=') {
            return Err(ClientError::InvalidRoute(format!(
                "expected key=value, got '{raw}'"
            )));
        }
        let (key, value) = form_urlencoded::parse(raw.as_bytes())
            .next()
            .unwrap_or_default();
        let trimmed_key = key.trim();
        if trimmed_key.is_empty() {
            return Err(ClientError::InvalidRoute(format!(
                "parameter name missing in '{raw}'"
            )));
        }
        Ok(Self {
            key: trimmed_key.to_owned(),
            value: value.trim().to_owned(),
        })
    }

    /// Parses a query string of updates in the order written, keeping
    /// empty values so that they remove their parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] for entries that are not
    /// `key=value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use litshop::view::ParamUpdate;
    ///
    /// let updates = ParamUpdate::parse_list("q=clean+code&genreId=a%26b&page=")
    ///     .expect("updates should parse");
    /// let pairs: Vec<(&str, &str)> = updates
    ///     .iter()
    ///     .map(|update| (update.key.as_str(), update.value.as_str()))
    ///     .collect();
    /// assert_eq!(pairs, [("q", "clean code"), ("genreId", "a&b"), ("page", "")]);
    /// ```
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, ClientError> {
        raw.strip_prefix('?')
            .unwrap_or(raw)
            .split('&')
            .filter(|entry| !entry.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}
