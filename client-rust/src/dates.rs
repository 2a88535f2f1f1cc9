use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a stored publish date into a timezone-less instant.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD` (midnight), local date-times such as
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]`, and RFC 3339 timestamps (taken at their UTC
/// instant). Returns `None` for anything else.
pub fn parse_publish_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = parse_calendar_date(value) {
        return Some(date.and_time(NaiveTime::MIN));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|date_time| date_time.naive_utc())
        })
}

/// Parse a calendar date (`YYYY-MM-DD` or `YYYY/MM/DD`).
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
