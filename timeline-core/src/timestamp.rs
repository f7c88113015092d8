use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Đọc thời điểm từ chuỗi do host định dạng.
///
/// Chuỗi RFC 3339 được quy về UTC; các định dạng không có múi giờ giữ nguyên giờ địa phương.
/// Trả về `None` khi chuỗi rỗng hoặc không khớp định dạng nào.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap()
    }

    #[test]
    fn parses_rfc3339_into_utc() {
        assert_eq!(
            parse_timestamp("2024-03-05T10:30:00+02:00"),
            Some(at(2024, 3, 5, 8, 30))
        );
        assert_eq!(
            parse_timestamp("2024-03-05T10:30:00Z"),
            Some(at(2024, 3, 5, 10, 30))
        );
    }

    #[test]
    fn parses_host_formatted_values() {
        assert_eq!(
            parse_timestamp("3/5/2024 9:15 AM"),
            Some(at(2024, 3, 5, 9, 15))
        );
        assert_eq!(
            parse_timestamp("3/5/2024 9:15 PM"),
            Some(at(2024, 3, 5, 21, 15))
        );
        assert_eq!(
            parse_timestamp("03/05/2024 17:45"),
            Some(at(2024, 3, 5, 17, 45))
        );
        assert_eq!(parse_timestamp("2024-03-05 08:00"), Some(at(2024, 3, 5, 8, 0)));
        assert_eq!(parse_timestamp("2024-03-05"), Some(at(2024, 3, 5, 0, 0)));
        assert_eq!(parse_timestamp("3/5/2024"), Some(at(2024, 3, 5, 0, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }
}
