//! Relative time labels for history lists ("3m ago").

use chrono::{DateTime, Utc};

pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - timestamp).num_seconds();
    if secs < 10 {
        // also covers clock skew (timestamp slightly in the future)
        return "just now".to_string();
    }
    if secs < 60 {
        return format!("{}s ago", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(now - Duration::seconds(42), now), "42s ago");
        assert_eq!(format_relative(now - Duration::minutes(3), now), "3m ago");
        assert_eq!(format_relative(now - Duration::hours(5), now), "5h ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2d ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let now = Utc::now();
        assert_eq!(format_relative(now + Duration::minutes(1), now), "just now");
    }
}
