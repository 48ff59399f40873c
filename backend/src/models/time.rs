use chrono::{DateTime, Utc};

/// Parse a client-supplied RFC 3339 timestamp and normalise it to UTC.
///
/// Offsets other than `Z` are accepted and converted, so `2024-05-01T12:00:00+02:00`
/// becomes `2024-05-01T10:00:00Z`.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_utc() {
        let ts = parse_timestamp("2024-05-01T12:00:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_offset_is_normalised() {
        let ts = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let ts = parse_timestamp("2024-05-01T12:00:00.250Z").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2024-05-01").is_err());
        assert!(parse_timestamp("").is_err());
    }
}
