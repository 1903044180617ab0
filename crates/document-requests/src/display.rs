use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Rendered in place of a timestamp that is absent or cannot be parsed.
pub const MISSING_TIMESTAMP: &str = "-";

const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, Postgres-style offsets (`+00`), naive date-times (read as wall-clock time
/// in `zone`) and bare dates (UTC midnight). Anything else yields `None`.
pub fn parse_timestamp(raw: &str, zone: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            // Wall-clock times inside a DST gap have no instant.
            return zone
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Render a raw timestamp as `DD.MM.YYYY HH:MM` (24h) in `zone`, or `"-"` when it is unusable.
pub fn format_for_display(raw: &str, zone: Tz) -> String {
    DisplayFormatter::new(zone).format(parse_timestamp(raw, zone))
}

/// Formats timestamps for a fixed display zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormatter {
    zone: Tz,
}

impl DisplayFormatter {
    pub const fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub const fn zone(&self) -> Tz {
        self.zone
    }

    pub fn format(&self, timestamp: Option<DateTime<Utc>>) -> String {
        match timestamp {
            Some(instant) => instant
                .with_timezone(&self.zone)
                .format(DISPLAY_FORMAT)
                .to_string(),
            None => MISSING_TIMESTAMP.to_string(),
        }
    }

    pub fn format_raw(&self, raw: &str) -> String {
        format_for_display(raw, self.zone)
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
