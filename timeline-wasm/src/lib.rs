//! Bridge WASM <-> JavaScript không trạng thái: render một trang hoặc sắp xếp id từ dataset JS.

use serde_json::Value;
use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::{sort_record_ids, PageState, TimelineConfig, TimelineError};
use timeline_dataset::{config_from_value, dataset_from_value};
use timeline_ui::render_page;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn render_timeline(
    dataset: JsValue,
    page: Option<usize>,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let dataset_value = read_optional(dataset, "dataset")?;
    let config_value = match config {
        Some(js_cfg) => read_optional(js_cfg, "config")?,
        None => None,
    };

    render_timeline_value(dataset_value.as_ref(), page, config_value.as_ref())
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))
}

#[wasm_bindgen]
pub fn sorted_record_ids(dataset: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let value = from_value::<Value>(dataset)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được dataset: {err}")))?;
    let ids = sorted_ids_value(&value)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&ids)
        .map_err(|err| JsValue::from_str(&format!("Không serialize danh sách id: {err}")))
}

/// Render một trang từ JSON; trang ngoài khoảng được kéo về trang hợp lệ gần nhất.
pub fn render_timeline_value(
    dataset: Option<&Value>,
    page: Option<usize>,
    config: Option<&Value>,
) -> Result<String, TimelineError> {
    let config = match config {
        Some(value) => config_from_value(value)?,
        None => TimelineConfig::default(),
    };

    let dataset = dataset.map(dataset_from_value).transpose()?;
    let mut state = PageState::at(page.unwrap_or(1));
    Ok(render_page(dataset.as_ref(), &mut state, &config).markup)
}

pub fn sorted_ids_value(dataset: &Value) -> Result<Vec<String>, TimelineError> {
    let dataset = dataset_from_value(dataset)?;
    Ok(sort_record_ids(&dataset)
        .into_iter()
        .map(str::to_string)
        .collect())
}

fn read_optional(value: JsValue, label: &str) -> Result<Option<Value>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    from_value::<Value>(value)
        .map(Some)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được {label}: {err}")))
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use timeline_ui::NO_ACTIVITIES_MARKUP;

    fn dataset(count: usize) -> Value {
        let entries: Vec<Value> = (0..count)
            .map(|idx| {
                json!({
                    "activityid": format!("id-{idx}"),
                    "subject": format!("Task {idx}"),
                    "scheduledstart": format!("2024-01-{:02}T08:00:00Z", idx + 1),
                    "statuscode": 0
                })
            })
            .collect();
        json!({ "value": entries })
    }

    #[test]
    fn renders_requested_page() {
        let markup = render_timeline_value(Some(&dataset(7)), Some(2), None).unwrap();
        assert!(markup.contains("Page 2 of 3"));
        assert!(markup.contains(r#"data-record-id="id-3""#));
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let markup = render_timeline_value(Some(&dataset(7)), Some(40), None).unwrap();
        assert!(markup.contains("Page 3 of 3"));

        let markup = render_timeline_value(Some(&dataset(7)), Some(0), None).unwrap();
        assert!(markup.contains("Page 1 of 3"));
    }

    #[test]
    fn missing_dataset_renders_placeholder() {
        assert_eq!(
            render_timeline_value(None, None, None).unwrap(),
            NO_ACTIVITIES_MARKUP
        );
    }

    #[test]
    fn config_changes_page_size() {
        let config = json!({ "pageSize": 2 });
        let markup = render_timeline_value(Some(&dataset(5)), None, Some(&config)).unwrap();
        assert!(markup.contains("Page 1 of 3"));
        assert!(matches!(
            render_timeline_value(Some(&dataset(5)), None, Some(&json!({ "pageSize": 0 }))),
            Err(TimelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn sorted_ids_are_newest_first() {
        let ids = sorted_ids_value(&dataset(3)).unwrap();
        assert_eq!(ids, vec!["id-2", "id-1", "id-0"]);
    }
}
