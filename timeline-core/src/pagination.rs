use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Trạng thái trang hiện tại (bắt đầu từ 1), thuộc riêng về một renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self { current_page: 1 }
    }
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bắt đầu ở một trang cụ thể; trang 0 được hiểu là trang 1.
    pub fn at(page: usize) -> Self {
        Self {
            current_page: page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Tính cửa sổ trang cho `total` bản ghi, đồng thời kéo trang hiện tại về trong
    /// khoảng [1, tổng số trang]. Trả về `None` khi không có bản ghi nào.
    pub fn window(&mut self, total: usize, page_size: usize) -> Option<PageWindow> {
        if total == 0 {
            return None;
        }

        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);
        if self.current_page > total_pages {
            log::debug!(
                "Trang {} vượt quá {total_pages} trang, kéo về trang cuối",
                self.current_page
            );
            self.current_page = total_pages;
        }

        let start = (self.current_page - 1) * page_size;
        let end = (start + page_size).min(total);
        Some(PageWindow {
            page: self.current_page,
            page_size,
            total,
            total_pages,
            start,
            end,
        })
    }

    /// Lùi một trang. Không làm gì ở trang đầu; trả về `true` nếu trang thay đổi.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Tiến một trang nếu chưa tới `total_pages`; trả về `true` nếu trang thay đổi.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.current_page < total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }
}

/// Kết quả phân trang cho một lần render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.end < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seven_records_first_page() {
        let mut state = PageState::new();
        let window = state.window(7, 3).unwrap();
        assert_eq!(window.range(), 0..3);
        assert_eq!(window.total_pages, 3);
        assert!(!window.has_previous());
        assert!(window.has_next());
    }

    #[test]
    fn seven_records_last_page() {
        let mut state = PageState::at(3);
        let window = state.window(7, 3).unwrap();
        assert_eq!(window.range(), 6..7);
        assert_eq!(window.len(), 1);
        assert!(window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn empty_total_has_no_window() {
        let mut state = PageState::at(4);
        assert_eq!(state.window(0, 3), None);
        assert_eq!(state.current_page(), 4);
    }

    #[test]
    fn shrinking_dataset_clamps_to_last_page() {
        let mut state = PageState::at(5);
        let window = state.window(4, 3).unwrap();
        assert_eq!(window.page, 2);
        assert_eq!(state.current_page(), 2);
        assert_eq!(window.range(), 3..4);
    }

    #[test]
    fn navigation_stops_at_boundaries() {
        let mut state = PageState::new();
        assert!(!state.previous());
        assert_eq!(state.current_page(), 1);

        assert!(state.next(2));
        assert!(!state.next(2));
        assert_eq!(state.current_page(), 2);

        assert!(state.previous());
        assert_eq!(state.current_page(), 1);
    }

    proptest! {
        #[test]
        fn window_respects_page_size(total in 1usize..200, page_size in 1usize..10, page in 1usize..40) {
            let mut state = PageState::at(page);
            let window = state.window(total, page_size).unwrap();

            prop_assert!(window.page >= 1 && window.page <= window.total_pages);
            prop_assert!(window.len() <= page_size);
            prop_assert_eq!(
                window.len(),
                page_size.min(total - (window.page - 1) * page_size)
            );
            prop_assert_eq!(window.has_previous(), window.page != 1);
            prop_assert_eq!(window.has_next(), window.end < total);
        }
    }
}
