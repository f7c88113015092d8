//! Dựng chuỗi HTML cho một trang timeline.

use std::fmt::Write;

use timeline_core::{
    sort_record_ids, ActivityField, DataRecord, DataSet, PageState, PageWindow, StatusColor,
    TimelineConfig,
};

/// Nội dung hiển thị khi không có hoạt động nào.
pub const NO_ACTIVITIES_MARKUP: &str = r#"<div class="no-activities">No activities found</div>"#;

/// Kết quả một lần render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub markup: String,
    /// `None` khi dataset rỗng (chỉ hiển thị placeholder).
    pub window: Option<PageWindow>,
}

/// Nút điều hướng trong thanh phân trang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous,
    Next,
}

impl PageControl {
    /// Giá trị thuộc tính `data-page-control` trên nút.
    pub fn attr(self) -> &'static str {
        match self {
            PageControl::Previous => "previous",
            PageControl::Next => "next",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "previous" => Some(PageControl::Previous),
            "next" => Some(PageControl::Next),
            _ => None,
        }
    }

    /// Nút được bấm, đọc từ thuộc tính `data-page-control`; nút đang `disabled` bị bỏ qua.
    pub fn from_button(attr: Option<&str>, disabled: bool) -> Option<Self> {
        if disabled {
            return None;
        }
        attr.and_then(Self::from_attr)
    }

    fn label(self) -> &'static str {
        match self {
            PageControl::Previous => "Previous",
            PageControl::Next => "Next",
        }
    }
}

/// Sắp xếp, cắt trang và dựng HTML. Trang hiện tại được kéo về trong khoảng hợp lệ.
pub fn render_page<D: DataSet + ?Sized>(
    dataset: Option<&D>,
    state: &mut PageState,
    config: &TimelineConfig,
) -> RenderedPage {
    let Some(dataset) = dataset.filter(|dataset| !dataset.is_empty()) else {
        return placeholder();
    };

    let sorted = sort_record_ids(dataset);
    let Some(window) = state.window(sorted.len(), config.page_size) else {
        return placeholder();
    };

    let mut markup = String::from(r#"<div class="timeline-container">"#);
    for id in &sorted[window.range()] {
        if let Some(record) = dataset.record(id) {
            render_entry(&mut markup, id, record);
        }
    }
    markup.push_str("</div>");
    render_pagination(&mut markup, &window);

    RenderedPage {
        markup,
        window: Some(window),
    }
}

fn placeholder() -> RenderedPage {
    RenderedPage {
        markup: NO_ACTIVITIES_MARKUP.to_string(),
        window: None,
    }
}

fn render_entry<R: DataRecord + ?Sized>(out: &mut String, id: &str, record: &R) {
    let subject = display_value(record, ActivityField::Subject);
    let start = display_value(record, ActivityField::ScheduledStart);
    let end = display_value(record, ActivityField::ScheduledEnd);
    let description = display_value(record, ActivityField::Description);
    let color = StatusColor::of_record(record).hex();

    let _ = write!(
        out,
        concat!(
            r#"<div class="timeline-item" data-record-id="{id}">"#,
            r#"<div class="timeline-dates">"#,
            r#"<div class="date"><strong>Start:</strong> {start}</div>"#,
            r#"<div class="date"><strong>End:</strong> {end}</div>"#,
            "</div>",
            r#"<div class="timeline-content" style="border-left: 4px solid {color};">"#,
            r#"<div class="subject">{subject}</div>"#,
            r#"<div class="description">{description}</div>"#,
            r#"<div class="status"><div class="status-indicator" style="background-color: {color};"></div></div>"#,
            "</div>",
            "</div>"
        ),
        id = escape_html(id),
        start = start,
        end = end,
        color = color,
        subject = subject,
        description = description,
    );
}

fn render_pagination(out: &mut String, window: &PageWindow) {
    out.push_str(r#"<div class="pagination-controls">"#);
    render_button(out, PageControl::Previous, !window.has_previous());
    let _ = write!(
        out,
        r#"<span class="page-indicator">Page {} of {}</span>"#,
        window.page, window.total_pages
    );
    render_button(out, PageControl::Next, !window.has_next());
    out.push_str("</div>");
}

fn render_button(out: &mut String, control: PageControl, disabled: bool) {
    let _ = write!(
        out,
        r#"<button type="button" class="page-control" data-page-control="{}"{}>{}</button>"#,
        control.attr(),
        if disabled { " disabled" } else { "" },
        control.label()
    );
}

/// Giá trị đã định dạng và escape; chuỗi rỗng hoặc vắng mặt dùng placeholder của trường.
fn display_value<R: DataRecord + ?Sized>(record: &R, field: ActivityField) -> String {
    match record.formatted_value(field) {
        Some(text) if !text.is_empty() => escape_html(&text),
        _ => field.placeholder().unwrap_or_default().to_string(),
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_core::{ActivityDataset, ActivityRecord};

    fn seven_records() -> ActivityDataset {
        // Thứ tự host cố ý xáo trộn; ngày càng lớn thì hạng càng cao.
        let days = [3, 7, 1, 5, 2, 6, 4];
        ActivityDataset::from_records(days.iter().map(|day| {
            ActivityRecord::new(format!("act-{day}"))
                .with_subject(format!("Activity {day}"))
                .with_start(format!("2024-05-0{day} 09:00"))
                .with_end(format!("2024-05-0{day} 10:00"))
                .with_status(0)
                .with_description(format!("Details {day}"))
        }))
    }

    fn rendered_ids(markup: &str) -> Vec<String> {
        markup
            .split(r#"data-record-id=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn first_page_of_seven() {
        let dataset = seven_records();
        let mut state = PageState::new();
        let page = render_page(Some(&dataset), &mut state, &TimelineConfig::default());

        assert_eq!(rendered_ids(&page.markup), vec!["act-7", "act-6", "act-5"]);
        assert!(page.markup.contains("Page 1 of 3"));
        assert!(page.markup.contains(
            r#"<button type="button" class="page-control" data-page-control="previous" disabled>Previous</button>"#
        ));
        assert!(page.markup.contains(
            r#"<button type="button" class="page-control" data-page-control="next">Next</button>"#
        ));
    }

    #[test]
    fn last_page_of_seven() {
        let dataset = seven_records();
        let mut state = PageState::at(3);
        let page = render_page(Some(&dataset), &mut state, &TimelineConfig::default());

        assert_eq!(rendered_ids(&page.markup), vec!["act-1"]);
        assert!(page.markup.contains("Page 3 of 3"));
        assert!(page.markup.contains(r#"data-page-control="next" disabled>Next"#));
        assert!(page.markup.contains(r#"data-page-control="previous">Previous"#));
    }

    #[test]
    fn empty_and_absent_datasets_render_placeholder() {
        let mut state = PageState::new();
        let config = TimelineConfig::default();

        let empty = render_page(Some(&ActivityDataset::new()), &mut state, &config);
        assert_eq!(empty.markup, NO_ACTIVITIES_MARKUP);
        assert_eq!(empty.window, None);

        let absent = render_page::<ActivityDataset>(None, &mut state, &config);
        assert_eq!(absent.markup, NO_ACTIVITIES_MARKUP);
        assert!(!absent.markup.contains("pagination-controls"));
    }

    #[test]
    fn missing_fields_use_placeholders_and_gray() {
        let dataset = ActivityDataset::from_records([ActivityRecord::new("bare")
            .with_subject("Call back")
            .with_end("")]);
        let page = render_page(
            Some(&dataset),
            &mut PageState::new(),
            &TimelineConfig::default(),
        );

        assert!(page.markup.contains("<strong>Start:</strong> No Start Date"));
        assert!(page.markup.contains("<strong>End:</strong> No End Date"));
        assert!(page.markup.contains(r#"<div class="description">No Description</div>"#));
        assert!(page.markup.contains(r#"<div class="subject">Call back</div>"#));
        assert!(page.markup.contains("border-left: 4px solid #6c757d;"));
        assert!(page.markup.contains("background-color: #6c757d;"));
        assert!(page.markup.contains("Page 1 of 1"));
        assert!(page.markup.contains(r#"data-page-control="next" disabled"#));
    }

    #[test]
    fn status_colors_follow_code() {
        let dataset = ActivityDataset::from_records([
            ActivityRecord::new("done").with_start("2024-01-03").with_status(0),
            ActivityRecord::new("busy").with_start("2024-01-02").with_status(1),
            ActivityRecord::new("dropped").with_start("2024-01-01").with_status(2),
        ]);
        let markup = render_page(
            Some(&dataset),
            &mut PageState::new(),
            &TimelineConfig::default(),
        )
        .markup;

        let done = markup.find("#28a745").unwrap();
        let busy = markup.find("#ffc107").unwrap();
        let dropped = markup.find("#dc3545").unwrap();
        assert!(done < busy && busy < dropped);
    }

    #[test]
    fn host_text_is_escaped() {
        let dataset = ActivityDataset::from_records([ActivityRecord::new("x\"y")
            .with_subject("<script>alert('hi')</script>")
            .with_description("Tom & Jerry")]);
        let markup = render_page(
            Some(&dataset),
            &mut PageState::new(),
            &TimelineConfig::default(),
        )
        .markup;

        assert!(markup.contains("&lt;script&gt;alert(&#39;hi&#39;)&lt;/script&gt;"));
        assert!(markup.contains("Tom &amp; Jerry"));
        assert!(markup.contains(r#"data-record-id="x&quot;y""#));
        assert!(!markup.contains("<script>"));
    }

    #[test]
    fn custom_page_size() {
        let dataset = seven_records();
        let page = render_page(
            Some(&dataset),
            &mut PageState::at(2),
            &TimelineConfig { page_size: 5 },
        );
        assert_eq!(rendered_ids(&page.markup), vec!["act-2", "act-1"]);
        assert!(page.markup.contains("Page 2 of 2"));
    }

    #[test]
    fn page_control_attr_round_trip() {
        for control in [PageControl::Previous, PageControl::Next] {
            assert_eq!(PageControl::from_attr(control.attr()), Some(control));
        }
        assert_eq!(PageControl::from_attr("first"), None);
    }

    #[test]
    fn disabled_or_unknown_buttons_do_not_navigate() {
        assert_eq!(
            PageControl::from_button(Some("next"), false),
            Some(PageControl::Next)
        );
        assert_eq!(
            PageControl::from_button(Some("previous"), false),
            Some(PageControl::Previous)
        );
        assert_eq!(PageControl::from_button(Some("next"), true), None);
        assert_eq!(PageControl::from_button(Some("previous"), true), None);
        assert_eq!(PageControl::from_button(None, false), None);
        assert_eq!(PageControl::from_button(Some("last"), false), None);
    }
}
