use chrono::NaiveDateTime;

use crate::{parse_timestamp, ActivityField, DataRecord, DataSet, FieldValue};

/// Khóa sắp xếp theo thời điểm bắt đầu.
///
/// Ưu tiên giá trị thô; nếu không đọc được thì thử chuỗi đã định dạng.
/// `None` nghĩa là thiếu hoặc không hợp lệ, được coi là cũ nhất.
pub fn start_sort_key<R: DataRecord + ?Sized>(record: &R) -> Option<NaiveDateTime> {
    match record.raw_value(ActivityField::ScheduledStart) {
        Some(FieldValue::DateTime(dt)) => return Some(dt.naive_utc()),
        Some(FieldValue::Text(text)) => {
            if let Some(parsed) = parse_timestamp(&text) {
                return Some(parsed);
            }
        }
        _ => {}
    }

    record
        .formatted_value(ActivityField::ScheduledStart)
        .and_then(|text| parse_timestamp(&text))
}

/// Sắp xếp id theo thời điểm bắt đầu giảm dần (mới nhất trước).
///
/// Sắp xếp ổn định: các bản ghi cùng khóa giữ thứ tự của host. Bản ghi không có thời điểm
/// hợp lệ nằm cuối. Id không tra được bản ghi sẽ bị bỏ qua.
pub fn sort_record_ids<D: DataSet + ?Sized>(dataset: &D) -> Vec<&str> {
    let mut keyed: Vec<(&str, Option<NaiveDateTime>)> = dataset
        .sorted_record_ids()
        .iter()
        .filter_map(|id| match dataset.record(id) {
            Some(record) => Some((id.as_str(), start_sort_key(record))),
            None => {
                log::warn!("Bỏ qua id {id}: host không cung cấp bản ghi tương ứng");
                None
            }
        })
        .collect();

    keyed.sort_by(|a, b| b.1.cmp(&a.1));
    keyed.into_iter().map(|(id, _)| id).collect()
}
