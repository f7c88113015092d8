use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ActivityField;

/// Giá trị thô của một trường, trước khi host định dạng.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

/// Một bản ghi do host cung cấp, tra cứu theo tên trường.
pub trait DataRecord {
    /// Giá trị đã định dạng để hiển thị.
    fn formatted_value(&self, field: ActivityField) -> Option<Cow<'_, str>>;

    /// Giá trị thô của trường.
    fn raw_value(&self, field: ActivityField) -> Option<FieldValue>;
}

/// Tập bản ghi chỉ đọc mà host truyền vào mỗi lần làm mới.
pub trait DataSet {
    type Record: DataRecord;

    /// Thứ tự mặc định của host (renderer sẽ tự sắp xếp lại).
    fn sorted_record_ids(&self) -> &[String];

    fn record(&self, id: &str) -> Option<&Self::Record>;

    fn is_empty(&self) -> bool {
        self.sorted_record_ids().is_empty()
    }
}

/// Hoạt động (task, appointment...) với các trường hiển thị trên timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(default)]
    pub id: String,
    pub subject: Option<String>,
    /// Thời điểm bắt đầu đã định dạng.
    #[serde(alias = "scheduledstart")]
    pub scheduled_start: Option<String>,
    /// Thời điểm bắt đầu gốc, ưu tiên khi sắp xếp.
    pub scheduled_start_raw: Option<DateTime<Utc>>,
    #[serde(alias = "scheduledend")]
    pub scheduled_end: Option<String>,
    pub scheduled_end_raw: Option<DateTime<Utc>>,
    #[serde(alias = "statuscode")]
    pub status_code: Option<i64>,
    pub description: Option<String>,
}

impl ActivityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.scheduled_start = Some(start.into());
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.scheduled_end = Some(end.into());
        self
    }

    pub fn with_status(mut self, code: i64) -> Self {
        self.status_code = Some(code);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl DataRecord for ActivityRecord {
    fn formatted_value(&self, field: ActivityField) -> Option<Cow<'_, str>> {
        let text = match field {
            ActivityField::Subject => self.subject.as_deref(),
            ActivityField::ScheduledStart => self.scheduled_start.as_deref(),
            ActivityField::ScheduledEnd => self.scheduled_end.as_deref(),
            ActivityField::Description => self.description.as_deref(),
            ActivityField::StatusCode => {
                return self.status_code.map(|code| Cow::Owned(code.to_string()));
            }
        };
        text.map(Cow::Borrowed)
    }

    fn raw_value(&self, field: ActivityField) -> Option<FieldValue> {
        match field {
            ActivityField::Subject => self.subject.clone().map(FieldValue::Text),
            ActivityField::Description => self.description.clone().map(FieldValue::Text),
            ActivityField::ScheduledStart => self
                .scheduled_start_raw
                .map(FieldValue::DateTime)
                .or_else(|| self.scheduled_start.clone().map(FieldValue::Text)),
            ActivityField::ScheduledEnd => self
                .scheduled_end_raw
                .map(FieldValue::DateTime)
                .or_else(|| self.scheduled_end.clone().map(FieldValue::Text)),
            ActivityField::StatusCode => self.status_code.map(FieldValue::Integer),
        }
    }
}

/// Dataset dựng sẵn trong bộ nhớ: bản ghi theo id cùng thứ tự mặc định của host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDataset {
    #[serde(default)]
    pub records: HashMap<String, ActivityRecord>,
    #[serde(default)]
    pub sorted_record_ids: Vec<String>,
}

impl ActivityDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dựng dataset giữ nguyên thứ tự truyền vào.
    pub fn from_records(records: impl IntoIterator<Item = ActivityRecord>) -> Self {
        let mut dataset = Self::new();
        for record in records {
            dataset.push(record);
        }
        dataset
    }

    /// Thêm hoặc thay thế bản ghi; id mới được nối vào cuối thứ tự.
    pub fn push(&mut self, record: ActivityRecord) {
        if !self.records.contains_key(&record.id) {
            self.sorted_record_ids.push(record.id.clone());
        }
        self.records.insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.sorted_record_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_record_ids.is_empty()
    }
}

impl DataSet for ActivityDataset {
    type Record = ActivityRecord;

    fn sorted_record_ids(&self) -> &[String] {
        &self.sorted_record_ids
    }

    fn record(&self, id: &str) -> Option<&ActivityRecord> {
        self.records.get(id)
    }
}
