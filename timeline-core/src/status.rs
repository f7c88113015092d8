use serde::{Deserialize, Serialize};

use crate::{ActivityField, DataRecord};

/// Màu trạng thái của hoạt động, suy ra từ `statuscode`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    /// 0: hoàn thành.
    Completed,
    /// 1: đang thực hiện.
    InProgress,
    /// 2: đã hủy.
    Canceled,
    Other,
}

impl StatusColor {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => StatusColor::Completed,
            Some(1) => StatusColor::InProgress,
            Some(2) => StatusColor::Canceled,
            _ => StatusColor::Other,
        }
    }

    /// Đọc mã trạng thái thô từ bản ghi; giá trị không phải số nguyên rơi về `Other`.
    pub fn of_record<R: DataRecord + ?Sized>(record: &R) -> Self {
        let code = record
            .raw_value(ActivityField::StatusCode)
            .and_then(|value| value.as_integer());
        Self::from_code(code)
    }

    pub fn hex(self) -> &'static str {
        match self {
            StatusColor::Completed => "#28a745",
            StatusColor::InProgress => "#ffc107",
            StatusColor::Canceled => "#dc3545",
            StatusColor::Other => "#6c757d",
        }
    }
}
