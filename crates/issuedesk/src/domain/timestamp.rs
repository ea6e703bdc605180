//! Timestamp text helpers.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Formats an instant as RFC 3339 UTC with microsecond precision.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The current instant, formatted with [`format_timestamp`].
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parses RFC 3339 with any offset, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// value taken as UTC.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Picks the new `updatedAt` value: `now`, unless `previous` is already
/// later (clock skew), in which case `previous` is kept.
#[must_use]
pub fn refreshed_timestamp(previous: &str, now: &str) -> String {
    match (parse_timestamp(previous), parse_timestamp(now)) {
        (Some(prev), Some(current)) if prev > current => previous.to_string(),
        _ => now.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn formats_with_micros_and_z() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(instant), "2024-01-15T10:00:00.000000Z");
    }

    #[rstest]
    #[case("2024-01-15T10:00:00Z")]
    #[case("2024-01-15T10:00:00.000000Z")]
    #[case("2024-01-15T11:00:00+01:00")]
    #[case("2024-01-15T10:00:00")]
    #[case("2024-01-15T10:00:00.000")]
    fn accepts_supported_forms(#[case] text: &str) {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp(text), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2024-13-45T10:00:00Z")]
    #[case("2024-01-15")]
    fn rejects_garbage(#[case] text: &str) {
        assert_eq!(parse_timestamp(text), None);
    }

    #[test]
    fn refresh_never_moves_backwards() {
        let later = "2030-01-01T00:00:00.000000Z";
        let earlier = "2024-01-01T00:00:00.000000Z";
        assert_eq!(refreshed_timestamp(later, earlier), later);
        assert_eq!(refreshed_timestamp(earlier, later), later);
    }

    #[test]
    fn refresh_replaces_unparseable_previous() {
        assert_eq!(refreshed_timestamp("garbage", "2024-01-01T00:00:00Z"), "2024-01-01T00:00:00Z");
    }
}
