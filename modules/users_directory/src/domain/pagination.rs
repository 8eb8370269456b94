//! Client-side pagination over the full fetched list.

/// Page size used when nothing else is configured.
pub const DEFAULT_USERS_PER_PAGE: usize = 5;

/// Number of pages needed for `total` items; 0 for an empty list.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// The items shown on `page` (1-based). Out-of-range pages yield an empty slice.
pub fn visible_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Current page plus a fixed page size.
///
/// The page is never validated against the list length: selecting a page past
/// the end, or deleting the last entry of the final page, leaves an empty view
/// rather than moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    current_page: usize,
    users_per_page: usize,
}

impl Default for PaginationView {
    fn default() -> Self {
        Self::new(DEFAULT_USERS_PER_PAGE)
    }
}

impl PaginationView {
    /// Start on page 1. A zero page size is lifted to 1.
    pub fn new(users_per_page: usize) -> Self {
        Self {
            current_page: 1,
            users_per_page: users_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn users_per_page(&self) -> usize {
        self.users_per_page
    }

    /// Jump to `page`. Pages are 1-based, so 0 becomes 1; no upper bound.
    pub fn select_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        visible_slice(items, self.current_page, self.users_per_page)
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total_pages(total, self.users_per_page)
    }
}
