//! Start-timestamp parsing and date formatting.
//!
//! Task start times are entered as text in both the CLI and the TUI form.
//! Parsing is forgiving with natural language support:
//! - "now" (or empty), "today", "tomorrow"
//! - "next monday", bare weekday names
//! - "in 3d", "in 2w"
//! - "YYYY-MM-DD", "YYYY-MM-DD HH:MM", RFC 3339
//! - any of the date forms with a trailing "HH:MM"

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parse user input into an absolute start timestamp.
///
/// Dates without a time component start at local midnight. Returns `None`
/// when the input matches no supported form.
pub fn parse_start_input(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim().to_lowercase();
    if s.is_empty() || s == "now" {
        return Some(Utc::now());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M") {
        return local_to_utc(naive);
    }

    // Split off a trailing HH:MM, leaving the date words.
    let (date_part, time) = match s.rsplit_once(' ') {
        Some((head, tail)) if tail.contains(':') => {
            (head.trim(), Some(NaiveTime::parse_from_str(tail, "%H:%M").ok()?))
        }
        _ => (s.as_str(), None),
    };

    let date = parse_date_words(date_part)?;
    let time = time.unwrap_or(NaiveTime::MIN);
    local_to_utc(date.and_time(time))
}

/// Resolve natural-language date words to a local calendar date.
fn parse_date_words(s: &str) -> Option<NaiveDate> {
    let today = Local::now().date_naive();

    match s {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    // "in X" patterns
    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    // Weekday patterns
    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];

    for (day_name, target_day) in weekdays {
        let current_day = today.weekday().num_days_from_monday() as i32;
        if s == day_name || s == format!("this {}", day_name) {
            // This week's occurrence, today included
            let days_ahead = (target_day + 7 - current_day) % 7;
            return Some(today + Duration::days(days_ahead as i64));
        }
        if s == format!("next {}", day_name) {
            let days_ahead = (target_day + 7 - current_day) % 7;
            let days_to_add = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return Some(today + Duration::days(days_to_add as i64));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Interpret a naive datetime in the local timezone.
///
/// Spring-forward gaps have no local representation; fall back to the
/// earliest valid instant after the gap.
fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a start timestamp for display, in local time.
pub fn format_start(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format a board date relative to today ("Today", "Tomorrow", "2026-08-06 (Thu)").
pub fn format_board_date(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    match delta {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%Y-%m-%d (%a)").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_datetime_in_local_time() {
        let parsed = parse_start_input("2026-03-02 09:30").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(local.format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn parses_rfc3339() {
        let parsed = parse_start_input("2026-03-02T00:00:00Z").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }

    #[test]
    fn bare_date_starts_at_midnight() {
        let parsed = parse_start_input("2026-03-02").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn relative_days() {
        let today = Local::now().date_naive();
        let parsed = parse_start_input("in 3d").unwrap().with_timezone(&Local);
        assert_eq!(parsed.date_naive(), today + Duration::days(3));
    }

    #[test]
    fn today_with_time() {
        let today = Local::now().date_naive();
        let parsed = parse_start_input("today 14:30").unwrap().with_timezone(&Local);
        assert_eq!(parsed.date_naive(), today);
        assert_eq!(parsed.format("%H:%M").to_string(), "14:30");
    }

    #[test]
    fn weekday_lands_on_right_day() {
        let parsed = parse_start_input("friday").unwrap().with_timezone(&Local);
        assert_eq!(parsed.weekday(), chrono::Weekday::Fri);
        let next = parse_start_input("next friday").unwrap().with_timezone(&Local);
        assert!(next.date_naive() > Local::now().date_naive());
        assert_eq!(next.weekday(), chrono::Weekday::Fri);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_start_input("soonish").is_none());
        assert!(parse_start_input("2026-13-40").is_none());
    }

    #[test]
    fn board_date_labels() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(format_board_date(today, today), "Today");
        assert_eq!(format_board_date(today + Duration::days(1), today), "Tomorrow");
        assert_eq!(format_board_date(today - Duration::days(1), today), "Yesterday");
        assert_eq!(
            format_board_date(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(), today),
            "2026-08-10 (Mon)"
        );
    }
}
