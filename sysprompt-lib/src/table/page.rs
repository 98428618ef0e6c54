//! Client-side pagination.

use std::ops::Range;

/// Allowed page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    /// All sizes, in menu order.
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty];

    /// Number of rows per page.
    pub const fn rows(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.rows() == value)
            .ok_or(value)
    }
}

/// Current page index and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub index: usize,
    pub size: PageSize,
}

impl Pagination {
    pub fn new(size: PageSize) -> Self {
        Self { index: 0, size }
    }

    /// Number of pages for `total` rows. Zero rows means zero pages.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.size.rows())
    }

    /// Index clamped to the last page that exists for `total` rows.
    pub fn clamped_index(&self, total: usize) -> usize {
        self.index.min(self.page_count(total).saturating_sub(1))
    }

    /// Row range of the current page, using the clamped index.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.clamped_index(total) * self.size.rows();
        let end = (start + self.size.rows()).min(total);
        start.min(end)..end
    }

    /// Changes the size, keeping the first visible row on the new page.
    ///
    /// The stored index may point past the last page; the top row
    /// saturates instead of overflowing.
    pub fn set_size(&mut self, size: PageSize) {
        let top_row = self.index.saturating_mul(self.size.rows());
        self.size = size;
        self.index = top_row / size.rows();
    }

    /// Returns `true` if a page follows the current one.
    pub fn has_next(&self, total: usize) -> bool {
        self.clamped_index(total) + 1 < self.page_count(total)
    }

    /// Returns `true` if a page precedes the current one.
    pub fn has_previous(&self, total: usize) -> bool {
        self.clamped_index(total) > 0
    }
}
