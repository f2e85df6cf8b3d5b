use chrono::{DateTime, Utc};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;

/// Describe `event` relative to `now`: "2 minutes ago", "in 3 hours".
///
/// Picks the coarsest of seconds, minutes, hours, days and months (30 days)
/// that gives a count of at least one. A zero offset is "just now".
pub fn humanize(event: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = event.signed_duration_since(now).num_seconds();
    if delta == 0 {
        return "just now".to_string();
    }

    let secs = delta.unsigned_abs();
    let (count, unit) = if secs < MINUTE {
        (secs, "second")
    } else if secs < HOUR {
        (secs / MINUTE, "minute")
    } else if secs < DAY {
        (secs / HOUR, "hour")
    } else if secs < MONTH {
        (secs / DAY, "day")
    } else {
        (secs / MONTH, "month")
    };
    let plural = if count == 1 { "" } else { "s" };

    if delta < 0 {
        format!("{} {}{} ago", count, unit, plural)
    } else {
        format!("in {} {}{}", count, unit, plural)
    }
}

/// Same as [`humanize`] for an epoch-seconds timestamp. Out-of-range values
/// are echoed back instead of failing.
pub fn humanize_epoch(epoch: i64, now: DateTime<Utc>) -> String {
    match DateTime::from_timestamp(epoch, 0) {
        Some(at) => humanize(at, now),
        None => epoch.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_past_and_future_minutes() {
        let past = humanize(now() - Duration::seconds(120), now());
        assert!(past.contains("minute") && past.contains("ago"), "{past}");
        assert_eq!(past, "2 minutes ago");

        let future = humanize(now() + Duration::seconds(120), now());
        assert!(future.contains("minute") && future.starts_with("in"), "{future}");
        assert_eq!(future, "in 2 minutes");
    }

    #[test]
    fn test_unit_selection() {
        let at = |secs: i64| humanize(now() + Duration::seconds(secs), now());
        assert_eq!(at(-1), "1 second ago");
        assert_eq!(at(59), "in 59 seconds");
        assert_eq!(at(60), "in 1 minute");
        assert_eq!(at(-3600), "1 hour ago");
        assert_eq!(at(-(2 * 86_400 + 5)), "2 days ago");
        assert_eq!(at(-(61 * 86_400)), "2 months ago");
        assert_eq!(at(400 * 86_400), "in 13 months");
    }

    #[test]
    fn test_zero_offset() {
        assert_eq!(humanize(now(), now()), "just now");
    }

    #[test]
    fn test_sub_second_offsets_round_toward_zero() {
        let event = now() + Duration::milliseconds(400);
        assert_eq!(humanize(event, now()), "just now");
    }

    #[test]
    fn test_epoch() {
        assert_eq!(humanize_epoch(1_700_000_000 - 180, now()), "3 minutes ago");
        assert_eq!(humanize_epoch(i64::MAX, now()), i64::MAX.to_string());
    }
}
