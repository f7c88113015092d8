#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-activity-timeline]";

/// Default CSS for the rendered markup, with design tokens that hosts can override.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --activity-timeline-font-family: 'Segoe UI', system-ui, -apple-system, sans-serif;
  --activity-timeline-text: #1f2933;
  --activity-timeline-muted: #52606d;
  --activity-timeline-card-bg: #ffffff;
  --activity-timeline-card-border: rgba(148, 163, 184, 0.35);
  --activity-timeline-rail: #d0d7de;
  --activity-timeline-radius: 8px;
  --activity-timeline-button-bg: #0078d4;
  --activity-timeline-button-text: #ffffff;
  --activity-timeline-button-disabled: #c8c6c4;
}

.timeline-container {
  font-family: var(--activity-timeline-font-family);
  color: var(--activity-timeline-text);
  display: flex;
  flex-direction: column;
  gap: 16px;
  padding: 12px 0;
  position: relative;
}

.timeline-item {
  display: grid;
  grid-template-columns: minmax(140px, 0.35fr) 1fr;
  gap: 16px;
  align-items: stretch;
}

.timeline-dates {
  display: flex;
  flex-direction: column;
  gap: 4px;
  font-size: 0.82rem;
  color: var(--activity-timeline-muted);
  text-align: right;
  padding-top: 6px;
}

.timeline-dates .date strong {
  color: var(--activity-timeline-text);
  font-weight: 600;
}

.timeline-content {
  position: relative;
  background: var(--activity-timeline-card-bg);
  border: 1px solid var(--activity-timeline-card-border);
  border-radius: var(--activity-timeline-radius);
  padding: 12px 40px 12px 16px;
  box-shadow: 0 4px 12px rgba(15, 23, 42, 0.06);
}

.timeline-content .subject {
  font-weight: 600;
  font-size: 0.98rem;
  margin-bottom: 4px;
}

.timeline-content .description {
  font-size: 0.88rem;
  color: var(--activity-timeline-muted);
  white-space: pre-wrap;
}

.timeline-content .status {
  position: absolute;
  top: 12px;
  right: 12px;
}

.status-indicator {
  width: 12px;
  height: 12px;
  border-radius: 50%;
}

.pagination-controls {
  font-family: var(--activity-timeline-font-family);
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 12px;
  padding: 8px 0 4px;
  color: var(--activity-timeline-muted);
}

.pagination-controls .page-control {
  border: none;
  border-radius: 4px;
  padding: 6px 14px;
  background: var(--activity-timeline-button-bg);
  color: var(--activity-timeline-button-text);
  cursor: pointer;
}

.pagination-controls .page-control:disabled {
  background: var(--activity-timeline-button-disabled);
  cursor: not-allowed;
}

.no-activities {
  font-family: var(--activity-timeline-font-family);
  color: var(--activity-timeline-muted);
  text-align: center;
  padding: 24px;
  font-style: italic;
}

@media (max-width: 640px) {
  .timeline-item {
    grid-template-columns: 1fr;
  }

  .timeline-dates {
    text-align: left;
    flex-direction: row;
    gap: 12px;
  }
}
"#;

/// Inject the default stylesheet once per document.
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-activity-timeline", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.dyn_into::<Node>()?)?;

    Ok(())
}
