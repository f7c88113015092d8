//! Vòng đời renderer: khởi tạo, làm mới theo yêu cầu của host và dọn dẹp.

use timeline_core::{DataSet, PageState, PageWindow, TimelineConfig};

use crate::markup::{render_page, PageControl};

/// Bề mặt hiển thị mà renderer ghi đè toàn bộ mỗi lần làm mới.
pub trait RenderSurface {
    fn replace_content(&mut self, markup: &str);

    fn clear(&mut self);
}

/// Bề mặt trong bộ nhớ, dùng cho CLI và test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSurface {
    content: String,
    writes: usize,
}

impl StringSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Số lần nội dung bị thay thế.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl RenderSurface for StringSurface {
    fn replace_content(&mut self, markup: &str) {
        self.content.clear();
        self.content.push_str(markup);
        self.writes += 1;
    }

    fn clear(&mut self) {
        self.content.clear();
    }
}

/// Giao diện vòng đời do host điều khiển, không phụ thuộc ABI của host cụ thể.
pub trait TimelineControl {
    type Surface: RenderSurface;

    /// Gắn bề mặt hiển thị.
    fn init(&mut self, surface: Self::Surface);

    /// Làm mới toàn bộ nội dung từ dataset mới nhất của host.
    fn update_view<D: DataSet + ?Sized>(&mut self, dataset: Option<&D>) -> Option<PageWindow>;

    /// Xóa nội dung đã render và trả lại bề mặt.
    fn destroy(&mut self) -> Option<Self::Surface>;
}

/// Renderer timeline: sở hữu trạng thái trang riêng cho từng instance.
#[derive(Debug)]
pub struct TimelineRenderer<S> {
    surface: Option<S>,
    state: PageState,
    config: TimelineConfig,
    last_window: Option<PageWindow>,
}

impl<S: RenderSurface> Default for TimelineRenderer<S> {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

impl<S: RenderSurface> TimelineRenderer<S> {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            surface: None,
            state: PageState::new(),
            config,
            last_window: None,
        }
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    /// Cửa sổ trang của lần render gần nhất (`None` nếu đang hiển thị placeholder).
    pub fn last_window(&self) -> Option<PageWindow> {
        self.last_window
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Xử lý nút Previous/Next rồi làm mới. Ở biên, trang giữ nguyên nhưng vẫn render lại.
    pub fn navigate<D: DataSet + ?Sized>(
        &mut self,
        control: PageControl,
        dataset: Option<&D>,
    ) -> Option<PageWindow> {
        let moved = match control {
            PageControl::Previous => self.state.previous(),
            PageControl::Next => {
                let total_pages = self.last_window.map_or(0, |window| window.total_pages);
                self.state.next(total_pages)
            }
        };
        if !moved {
            log::debug!(
                "Nút {} không có tác dụng ở trang {}",
                control.attr(),
                self.state.current_page()
            );
        }
        self.update_view(dataset)
    }
}

impl<S: RenderSurface> TimelineControl for TimelineRenderer<S> {
    type Surface = S;

    fn init(&mut self, surface: S) {
        log::info!("Khởi tạo timeline với {} bản ghi/trang", self.config.page_size);
        self.surface = Some(surface);
    }

    fn update_view<D: DataSet + ?Sized>(&mut self, dataset: Option<&D>) -> Option<PageWindow> {
        let page = render_page(dataset, &mut self.state, &self.config);
        match page.window {
            Some(window) => log::debug!(
                "Render trang {}/{} ({} bản ghi)",
                window.page,
                window.total_pages,
                window.total
            ),
            None => log::debug!("Dataset rỗng, hiển thị placeholder"),
        }

        match self.surface.as_mut() {
            Some(surface) => surface.replace_content(&page.markup),
            None => log::warn!("update_view được gọi trước init, bỏ qua việc ghi nội dung"),
        }

        self.last_window = page.window;
        page.window
    }

    fn destroy(&mut self) -> Option<S> {
        let mut surface = self.surface.take()?;
        surface.clear();
        self.last_window = None;
        log::info!("Đã gỡ timeline");
        Some(surface)
    }
}
