/// Page arithmetic for a list of `total_items`, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_items: u32,
    pub items_per_page: u32,
}

impl Pagination {
    pub fn total_pages(&self) -> u32 {
        if self.items_per_page == 0 {
            return 1;
        }
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// The previous page, or `None` on the first page.
    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current_page - 1)
    }

    /// The next page, or `None` on the last page.
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages())
    }
}
