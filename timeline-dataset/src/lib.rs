//! Host JSON to `ActivityDataset` adapters.
//!
//! Two payload shapes are accepted:
//! - the control's own serialized dataset: `{"records": {...}, "sortedRecordIds": [...]}`
//! - a Dataverse Web API collection: `{"value": [{"activityid": ..., "subject": ...}]}`,
//!   where `<field>@OData.Community.Display.V1.FormattedValue` annotations carry display text.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use timeline_core::{ActivityDataset, ActivityField, ActivityRecord, TimelineConfig, TimelineError};

const FORMATTED_VALUE_SUFFIX: &str = "@OData.Community.Display.V1.FormattedValue";
const ID_FIELDS: [&str; 3] = ["activityid", "id", "@odata.id"];

/// Build a dataset from a JSON string.
pub fn dataset_from_str(json: &str) -> Result<ActivityDataset, TimelineError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    dataset_from_value(&value)
}

/// Build a dataset from a `serde_json::Value` in either supported shape.
pub fn dataset_from_value(payload: &Value) -> Result<ActivityDataset, TimelineError> {
    if let Some(entries) = payload.as_array() {
        return Ok(from_web_api(entries));
    }

    let object = payload.as_object().ok_or(TimelineError::MissingData)?;

    if object.contains_key("records") {
        return from_native(object);
    }

    let entries = object
        .get("value")
        .and_then(Value::as_array)
        .ok_or(TimelineError::MissingData)?;
    Ok(from_web_api(entries))
}

/// Read a partial config object; missing fields keep their defaults.
pub fn config_from_value(value: &Value) -> Result<TimelineConfig, TimelineError> {
    let partial: PartialConfig = serde_json::from_value(value.clone())
        .map_err(|err| TimelineError::Parse(format!("Invalid config: {err}")))?;
    let config = TimelineConfig::from(partial);
    config.validate()?;
    Ok(config)
}

#[derive(Deserialize)]
struct PartialConfig {
    #[serde(default, alias = "pageSize")]
    page_size: Option<usize>,
}

impl From<PartialConfig> for TimelineConfig {
    fn from(cfg: PartialConfig) -> Self {
        let mut base = TimelineConfig::default();
        if let Some(page_size) = cfg.page_size {
            base.page_size = page_size;
        }
        base
    }
}

fn from_native(object: &Map<String, Value>) -> Result<ActivityDataset, TimelineError> {
    let order: Vec<String> = match object.get("sortedRecordIds") {
        Some(ids) => serde_json::from_value(ids.clone())
            .map_err(|err| TimelineError::Parse(format!("Invalid sortedRecordIds: {err}")))?,
        None => Vec::new(),
    };

    let mut records: Vec<ActivityRecord> = match object.get("records") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, raw)| {
                let mut record: ActivityRecord = serde_json::from_value(raw.clone())
                    .map_err(|err| TimelineError::Parse(format!("Record {key}: {err}")))?;
                // The map key is what sortedRecordIds refers to.
                if record.id != *key {
                    if !record.id.is_empty() {
                        log::warn!("Record {key} carries id {}, using the map key", record.id);
                    }
                    record.id = key.clone();
                }
                Ok(record)
            })
            .collect::<Result<_, TimelineError>>()?,
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                let mut record: ActivityRecord = serde_json::from_value(raw.clone())
                    .map_err(|err| TimelineError::Parse(format!("Record #{idx}: {err}")))?;
                if record.id.is_empty() {
                    record.id = fallback_id(idx);
                }
                Ok(record)
            })
            .collect::<Result<_, TimelineError>>()?,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(TimelineError::Parse(format!(
                "Expected records to be an object or array, received {other}"
            )))
        }
    };

    if order.is_empty() {
        if matches!(object.get("records"), Some(Value::Object(_))) {
            // Map iteration order is not meaningful; fall back to a stable order.
            records.sort_by(|a, b| a.id.cmp(&b.id));
        }
        return Ok(ActivityDataset::from_records(records));
    }

    let mut dataset = ActivityDataset {
        records: records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect(),
        sorted_record_ids: order,
    };
    dataset.sorted_record_ids.retain(|id| !id.is_empty());
    Ok(dataset)
}

fn from_web_api(entries: &[Value]) -> ActivityDataset {
    let mut dataset = ActivityDataset::new();
    for (idx, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            log::warn!("Skipping non-object entry #{idx}");
            continue;
        };
        dataset.push(record_from_entity(idx, entry));
    }
    dataset
}

fn record_from_entity(idx: usize, entity: &Map<String, Value>) -> ActivityRecord {
    let id = ID_FIELDS
        .iter()
        .find_map(|field| entity.get(*field).and_then(scalar_text))
        .unwrap_or_else(|| fallback_id(idx));

    ActivityRecord {
        id,
        subject: formatted_text(entity, ActivityField::Subject),
        scheduled_start: formatted_text(entity, ActivityField::ScheduledStart),
        scheduled_start_raw: raw_datetime(entity, ActivityField::ScheduledStart),
        scheduled_end: formatted_text(entity, ActivityField::ScheduledEnd),
        scheduled_end_raw: raw_datetime(entity, ActivityField::ScheduledEnd),
        status_code: entity
            .get(ActivityField::StatusCode.name())
            .and_then(integer_value),
        description: formatted_text(entity, ActivityField::Description),
    }
}

fn fallback_id(idx: usize) -> String {
    format!("activity-{}", idx + 1)
}

/// Display text for a field: the formatted annotation wins over the raw value.
fn formatted_text(entity: &Map<String, Value>, field: ActivityField) -> Option<String> {
    let annotation = format!("{}{FORMATTED_VALUE_SUFFIX}", field.name());
    entity
        .get(&annotation)
        .and_then(scalar_text)
        .or_else(|| entity.get(field.name()).and_then(scalar_text))
}

fn raw_datetime(entity: &Map<String, Value>, field: ActivityField) -> Option<DateTime<Utc>> {
    entity
        .get(field.name())
        .and_then(Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.fract() == 0.0)
            .map(|number| number as i64)
    })
}
