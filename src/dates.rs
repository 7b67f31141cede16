//! Date formatting for the entry list ("posted 3 hours ago") and the
//! detail modal ("April 13th 2015, 5:00 pm"). Both are total functions:
//! a missing date formats as the empty string.

use chrono::{DateTime, Datelike, Utc};

pub fn time_ago(t: Option<DateTime<Utc>>) -> String {
    match t {
        Some(t) => time_ago_from(t, Utc::now()),
        None => String::new(),
    }
}

/// Relative formatting, pure in `(t, now)`. Thresholds follow the usual
/// humanized buckets: seconds round to minutes, minutes to hours, and so
/// on, with singular forms at each boundary.
pub fn time_ago_from(t: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(t).num_seconds().max(0);
    let minutes = (seconds + 30) / 60;
    let hours = (minutes + 30) / 60;
    let days = (hours + 12) / 24;

    if seconds < 45 {
        "a few seconds ago".to_string()
    } else if seconds < 90 {
        "a minute ago".to_string()
    } else if minutes < 45 {
        format!("{} minutes ago", minutes)
    } else if minutes < 90 {
        "an hour ago".to_string()
    } else if hours < 22 {
        format!("{} hours ago", hours)
    } else if hours < 36 {
        "a day ago".to_string()
    } else if days < 26 {
        format!("{} days ago", days)
    } else if days < 46 {
        "a month ago".to_string()
    } else if days < 320 {
        format!("{} months ago", ((days as f64) / 30.44).round() as i64)
    } else if days < 548 {
        "a year ago".to_string()
    } else {
        format!("{} years ago", ((days as f64) / 365.25).round() as i64)
    }
}

/// Full date in the modal header, e.g. "April 13th 2015, 5:00 pm".
pub fn full_date(t: Option<DateTime<Utc>>) -> String {
    match t {
        Some(t) => {
            let day = t.day();
            format!(
                "{} {}{} {}, {}",
                t.format("%B"),
                day,
                ordinal_suffix(day),
                t.format("%Y"),
                t.format("%-I:%M %P"),
            )
        }
        None => String::new(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11 | 12 | 13 => "th",
        d if d % 10 == 1 => "st",
        d if d % 10 == 2 => "nd",
        d if d % 10 == 3 => "rd",
        _ => "th",
    }
}
