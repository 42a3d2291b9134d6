use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Parses the encoder's `M/D/YY HH:MM:SS` or `M/D/YYYY HH:MM:SS` text.
///
/// The time part is optional and defaults to midnight. Two-digit years map to
/// 2000+YY. Returns `None` for anything that does not compose into a valid
/// date-time; many device rows carry no usable date at all.
pub fn parse_device_timestamp(input: &str) -> Option<NaiveDateTime> {
    let mut parts = input.split_whitespace();
    let date_str = parts.next()?;
    let time_str = parts.next().unwrap_or("00:00:00");

    let segments: Vec<&str> = date_str.split('/').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return None;
    }

    let month: u32 = segments[0].parse().ok()?;
    let day: u32 = segments[1].parse().ok()?;
    let year_raw = segments[2];
    let mut year: i32 = year_raw.parse().ok()?;
    if year_raw.len() <= 2 {
        year += 2000;
    }

    // Some exports drop the seconds.
    let time_str = if time_str.matches(':').count() == 1 {
        format!("{}:00", time_str)
    } else {
        time_str.to_string()
    };

    let composed = format!("{:04}-{:02}-{:02} {}", year, month, day, time_str);
    NaiveDateTime::parse_from_str(&composed, "%Y-%m-%d %H:%M:%S").ok()
}

/// Floors a timestamp to the most recent Sunday at 00:00:00.
pub fn week_start(ts: NaiveDateTime) -> NaiveDateTime {
    let date = ts.date();
    let back = date.weekday().num_days_from_sunday() as i64;
    (date - Duration::days(back)).and_time(NaiveTime::MIN)
}

/// Exclusive end of the week bucket that starts at `start`.
pub fn week_end(start: NaiveDateTime) -> NaiveDateTime {
    start + Duration::days(7)
}

pub fn format_short_date(ts: NaiveDateTime) -> String {
    ts.format("%m/%d/%Y").to_string()
}

pub fn format_time(ts: NaiveDateTime) -> String {
    ts.format("%H:%M:%S").to_string()
}

pub fn format_date_time(ts: NaiveDateTime) -> String {
    format!("{} {}", format_short_date(ts), format_time(ts))
}

/// `MM/DD - MM/DD` covering Sunday through Saturday of the bucket.
pub fn format_week_range(start: NaiveDateTime) -> String {
    let last_day = week_end(start) - Duration::days(1);
    format!("{} - {}", start.format("%m/%d"), last_day.format("%m/%d"))
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_parse_two_and_four_digit_years() {
        assert_eq!(parse_device_timestamp("3/15/24 14:00:00"), Some(at(2024, 3, 15, 14, 0, 0)));
        assert_eq!(parse_device_timestamp("3/15/2024 14:00:00"), Some(at(2024, 3, 15, 14, 0, 0)));
        assert_eq!(parse_device_timestamp("12/1/05 07:08:09"), Some(at(2005, 12, 1, 7, 8, 9)));
    }

    #[test]
    fn test_parse_time_defaults_to_midnight() {
        assert_eq!(parse_device_timestamp("3/15/2024"), Some(at(2024, 3, 15, 0, 0, 0)));
        assert_eq!(parse_device_timestamp("  3/15/2024  "), Some(at(2024, 3, 15, 0, 0, 0)));
        assert_eq!(parse_device_timestamp("3/15/2024 09:30"), Some(at(2024, 3, 15, 9, 30, 0)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_device_timestamp(""), None);
        assert_eq!(parse_device_timestamp("3/15"), None);
        assert_eq!(parse_device_timestamp("3/15/2024/1 10:00:00"), None);
        assert_eq!(parse_device_timestamp("3//2024"), None);
        assert_eq!(parse_device_timestamp("13/15/2024 10:00:00"), None);
        assert_eq!(parse_device_timestamp("2/30/2024 10:00:00"), None);
        assert_eq!(parse_device_timestamp("3/15/2024 25:00:00"), None);
        assert_eq!(parse_device_timestamp("March 15 2024"), None);
    }

    #[test]
    fn test_week_start_is_previous_sunday() {
        // 2024-03-15 is a Friday.
        assert_eq!(week_start(at(2024, 3, 15, 14, 0, 0)), at(2024, 3, 10, 0, 0, 0));
        // Sunday maps to itself at midnight.
        assert_eq!(week_start(at(2024, 3, 10, 23, 59, 59)), at(2024, 3, 10, 0, 0, 0));
        // Crosses a month boundary.
        assert_eq!(week_start(at(2024, 3, 2, 8, 0, 0)), at(2024, 2, 25, 0, 0, 0));
    }

    #[test]
    fn test_formatting() {
        let ts = at(2024, 3, 5, 7, 4, 9);
        assert_eq!(format_short_date(ts), "03/05/2024");
        assert_eq!(format_time(ts), "07:04:09");
        assert_eq!(format_date_time(ts), "03/05/2024 07:04:09");
        assert_eq!(format_week_range(at(2024, 3, 31, 0, 0, 0)), "03/31 - 04/06");
        assert_eq!(month_name(3), "March");
        assert_eq!(month_name(0), "Unknown");
        assert_eq!(month_name(13), "Unknown");
    }

    #[test]
    fn test_week_end_is_exclusive() {
        let start = at(2024, 3, 10, 0, 0, 0);
        assert_eq!(week_end(start), at(2024, 3, 17, 0, 0, 0));
        assert_eq!(week_start(week_end(start) - Duration::seconds(1)), start);
        assert_eq!(week_start(week_end(start)).weekday(), Weekday::Sun);
    }
}
