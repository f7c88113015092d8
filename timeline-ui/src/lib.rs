//! Thành phần giao diện timeline hoạt động: dựng HTML, vòng đời renderer và control cho WebAssembly.

mod markup;
mod renderer;

#[cfg(target_arch = "wasm32")]
mod control;
#[cfg(target_arch = "wasm32")]
mod styles;

pub use markup::{render_page, PageControl, RenderedPage, NO_ACTIVITIES_MARKUP};
pub use renderer::{RenderSurface, StringSurface, TimelineControl, TimelineRenderer};

#[cfg(target_arch = "wasm32")]
pub use control::ActivityTimelineControl;
#[cfg(target_arch = "wasm32")]
pub use styles::{ensure_styles, DEFAULT_STYLES};
