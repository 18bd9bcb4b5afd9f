//! Sort direction and comparison helpers shared by list views.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    /// Parses `asc` or `desc` (case-insensitive); anything else is ascending.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
            Some("desc") => Self::Descending,
            _ => Self::Ascending,
        }
    }

    /// Returns the query-parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Applies the direction to an ascending comparison.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Compares text lexicographically, ignoring case.
#[must_use]
pub fn compare_text(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

/// Compares optional dates chronologically; missing dates sort first.
#[must_use]
pub fn compare_dates(left: Option<NaiveDate>, right: Option<NaiveDate>) -> Ordering {
    left.cmp(&right)
}

/// Returns true when `haystack` contains `needle`, ignoring case.
#[must_use]
pub fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
