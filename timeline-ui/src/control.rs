#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use serde_wasm_bindgen::from_value;
use timeline_core::{ActivityDataset, TimelineConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, Event, HtmlElement};

use crate::markup::PageControl;
use crate::renderer::{RenderSurface, TimelineControl, TimelineRenderer};
use crate::styles;

struct ElementSurface {
    element: HtmlElement,
}

impl RenderSurface for ElementSurface {
    fn replace_content(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn clear(&mut self) {
        self.element.set_inner_html("");
    }
}

struct ControlState {
    renderer: TimelineRenderer<ElementSurface>,
    dataset: Option<ActivityDataset>,
}

/// Control nhúng vào DOM: host gọi `init`, `updateView`, `destroy`.
#[wasm_bindgen]
pub struct ActivityTimelineControl {
    state: Rc<RefCell<ControlState>>,
    container: Option<HtmlElement>,
    on_click: Option<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl ActivityTimelineControl {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<ActivityTimelineControl, JsValue> {
        let config = match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
                let value = from_value::<serde_json::Value>(js_cfg)
                    .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
                timeline_dataset::config_from_value(&value)
                    .map_err(|err| JsValue::from_str(&err.to_string()))?
            }
            _ => TimelineConfig::default(),
        };

        Ok(Self {
            state: Rc::new(RefCell::new(ControlState {
                renderer: TimelineRenderer::new(config),
                dataset: None,
            })),
            container: None,
            on_click: None,
        })
    }

    /// Gắn control vào phần tử chứa và đăng ký một listener click duy nhất cho phân trang.
    pub fn init(&mut self, container: HtmlElement) -> Result<(), JsValue> {
        if self.container.is_some() {
            self.destroy();
        }

        if let Some(document) = container.owner_document() {
            if let Err(err) = styles::ensure_styles(&document) {
                console::error_1(&err);
            }
        }

        let state = Rc::clone(&self.state);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(control) = clicked_control(&event) else {
                return;
            };
            let mut guard = state.borrow_mut();
            let ControlState { renderer, dataset } = &mut *guard;
            renderer.navigate(control, dataset.as_ref());
        });
        container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        self.state.borrow_mut().renderer.init(ElementSurface {
            element: container.clone(),
        });
        self.container = Some(container);
        self.on_click = Some(on_click);
        Ok(())
    }

    /// Nhận dataset mới (JSON gốc của control hoặc collection Web API) và render lại.
    #[wasm_bindgen(js_name = updateView)]
    pub fn update_view(&mut self, dataset: JsValue) -> Result<(), JsValue> {
        let dataset = if dataset.is_undefined() || dataset.is_null() {
            None
        } else {
            let value = from_value::<serde_json::Value>(dataset)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được dataset: {err}")))?;
            Some(
                timeline_dataset::dataset_from_value(&value)
                    .map_err(|err| JsValue::from_str(&err.to_string()))?,
            )
        };

        let mut guard = self.state.borrow_mut();
        guard.dataset = dataset;
        let ControlState { renderer, dataset } = &mut *guard;
        renderer.update_view(dataset.as_ref());
        Ok(())
    }

    /// Xóa nội dung, gỡ listener.
    pub fn destroy(&mut self) {
        if let (Some(container), Some(on_click)) = (self.container.take(), self.on_click.take()) {
            if let Err(err) = container
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                console::error_1(&err);
            }
        }

        let mut guard = self.state.borrow_mut();
        guard.renderer.destroy();
        guard.dataset = None;
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> usize {
        self.state.borrow().renderer.current_page()
    }
}

fn clicked_control(event: &Event) -> Option<PageControl> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let button = target.closest("button[data-page-control]").ok()??;
    PageControl::from_button(
        button.get_attribute("data-page-control").as_deref(),
        button.has_attribute("disabled"),
    )
}
