pub mod app;
pub mod components;
pub mod markdown;
pub mod state;

pub use app::ChatApp;

use chrono::{DateTime, Local};

/// Local calendar date for a unix-millis timestamp.
pub(crate) fn format_date(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Local wall-clock time for a unix-millis timestamp.
pub(crate) fn format_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_timestamp_formats_empty() {
        assert_eq!(format_date(i64::MAX), "");
        assert_eq!(format_time(i64::MIN), "");
    }

    #[test]
    fn epoch_formats_to_some_date() {
        assert!(!format_date(0).is_empty());
        assert!(!format_time(0).is_empty());
    }
}
