//! Client-side pagination of filtered list data.

/// Position of the visible page within a filtered result set.
///
/// # Example
///
/// ```
/// use litshop::view::pagination::paginate;
///
/// let slice = paginate((1..=15).collect::<Vec<u32>>(), 3, 5);
/// assert_eq!(slice.items, vec![11, 12, 13, 14, 15]);
/// assert_eq!(slice.info.total_pages(), 3);
/// assert!(slice.info.is_last_page());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: u32,
    /// Items per page.
    page_size: u32,
    /// Total number of pages, never less than 1.
    total_pages: u32,
    /// Items remaining after filtering.
    total_items: usize,
}

impl PageInfo {
    /// Computes page info for `total_items` items.
    ///
    /// A zero page size is treated as 1.
    #[must_use]
    pub fn new(current_page: u32, page_size: u32, total_items: usize) -> Self {
        let size = usize::try_from(page_size.max(1)).unwrap_or(usize::MAX);
        let pages = total_items.div_ceil(size).max(1);
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
            total_items,
        }
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns `max(1, ceil(total_items / page_size))`.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns the number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns true if more pages exist after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns true if pages exist before the current one.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if this is the first page.
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// Returns true if this is the last page (or beyond it).
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        !self.has_next()
    }

    /// Returns true when the page lies past the last page.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages
    }
}

/// Visible items together with their page position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    /// Items on the requested page.
    pub items: Vec<T>,
    /// Page position.
    pub info: PageInfo,
}

/// Slices `items` to the half-open range
/// `[(page - 1) * page_size, page * page_size)`.
///
/// Pages beyond the end yield an empty slice rather than an error.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> PageSlice<T> {
    let info = PageInfo::new(page, page_size, items.len());
    let size = usize::try_from(info.page_size()).unwrap_or(usize::MAX);
    let offset = usize::try_from(info.current_page().saturating_sub(1))
        .unwrap_or(usize::MAX)
        .saturating_mul(size);
    let visible = items.into_iter().skip(offset).take(size).collect();
    PageSlice {
        items: visible,
        info,
    }
}
