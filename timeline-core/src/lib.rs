//! Logic lõi cho timeline hoạt động: mô hình bản ghi, dataset của host, sắp xếp và phân trang.

mod dataset;
mod ordering;
mod pagination;
mod status;
mod timestamp;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use dataset::{ActivityDataset, ActivityRecord, DataRecord, DataSet, FieldValue};
pub use ordering::{sort_record_ids, start_sort_key};
pub use pagination::{PageState, PageWindow};
pub use status::StatusColor;
pub use timestamp::parse_timestamp;

/// Số bản ghi mặc định trên một trang.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Cấu hình hiển thị timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineConfig {
    /// Số bản ghi trên mỗi trang.
    pub page_size: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TimelineConfig {
    /// Kiểm tra cấu hình trước khi dùng cho renderer.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.page_size == 0 {
            return Err(TimelineError::InvalidConfig(
                "page_size phải lớn hơn 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Các trường mà host cung cấp cho một hoạt động.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityField {
    Subject,
    ScheduledStart,
    ScheduledEnd,
    StatusCode,
    Description,
}

impl ActivityField {
    pub const ALL: [ActivityField; 5] = [
        ActivityField::Subject,
        ActivityField::ScheduledStart,
        ActivityField::ScheduledEnd,
        ActivityField::StatusCode,
        ActivityField::Description,
    ];

    /// Tên logic của trường phía host.
    pub fn name(self) -> &'static str {
        match self {
            ActivityField::Subject => "subject",
            ActivityField::ScheduledStart => "scheduledstart",
            ActivityField::ScheduledEnd => "scheduledend",
            ActivityField::StatusCode => "statuscode",
            ActivityField::Description => "description",
        }
    }

    /// Chuỗi thay thế khi trường vắng mặt. `statuscode` không hiển thị nên không có.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            ActivityField::Subject => Some("No Subject"),
            ActivityField::ScheduledStart => Some("No Start Date"),
            ActivityField::ScheduledEnd => Some("No End Date"),
            ActivityField::Description => Some("No Description"),
            ActivityField::StatusCode => None,
        }
    }
}

impl fmt::Display for ActivityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityField {
    type Err = TimelineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ActivityField::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| TimelineError::Parse(format!("Trường không hỗ trợ: {name}")))
    }
}

/// Lỗi chung ở biên nhận dữ liệu và cấu hình. Bản thân việc render không bao giờ lỗi.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Dữ liệu đầu vào thiếu thông tin tối thiểu")]
    MissingData,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Cấu hình không hợp lệ: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in ActivityField::ALL {
            assert_eq!(field.name().parse::<ActivityField>().unwrap(), field);
        }
        assert!("ownerid".parse::<ActivityField>().is_err());
    }

    #[test]
    fn default_config_uses_three_per_page() {
        let config = TimelineConfig::default();
        assert_eq!(config.page_size, 3);
        assert!(config.validate().is_ok());
        assert!(matches!(
            TimelineConfig { page_size: 0 }.validate(),
            Err(TimelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn status_code_has_no_placeholder() {
        assert_eq!(ActivityField::StatusCode.placeholder(), None);
        assert_eq!(ActivityField::Subject.placeholder(), Some("No Subject"));
    }
}
