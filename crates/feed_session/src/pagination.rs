pub const PAGE_SIZE: usize = 20;

/// "Load more" window over a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    window: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            window: page_size,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn show_more(&mut self) {
        self.window += self.page_size;
    }

    pub fn reset(&mut self) {
        self.window = self.page_size;
    }

    pub fn visible_len(&self, total: usize) -> usize {
        total.min(self.window)
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.window
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forty_five_results() {
        let mut pages = Pagination::default();
        assert_eq!(pages.visible_len(45), 20);
        assert!(pages.has_more(45));

        pages.show_more();
        assert_eq!(pages.visible_len(45), 40);
        assert!(pages.has_more(45));

        pages.show_more();
        assert_eq!(pages.visible_len(45), 45);
        assert!(!pages.has_more(45));
    }

    #[test]
    fn test_reset() {
        let mut pages = Pagination::default();
        pages.show_more();
        pages.show_more();
        pages.reset();
        assert_eq!(pages.window(), PAGE_SIZE);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        assert_eq!(Pagination::new(0).window(), 1);
    }
}
