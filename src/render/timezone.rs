/// Fixed-offset report zones
///
/// Reports use plain UTC offsets with no DST rules.
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

const SECONDS_PER_HOUR: i32 = 3600;

/// A labelled fixed UTC offset, e.g. "GMT+3"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportZone {
    label: &'static str,
    offset: FixedOffset,
}

impl ReportZone {
    /// Zone for a whole-hour offset east of UTC. Returns `None` outside ±23h.
    pub fn from_hours(label: &'static str, hours: i32) -> Option<Self> {
        hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { label, offset })
    }

    /// The three report zones, in output order
    pub fn defaults() -> Vec<ReportZone> {
        [("GMT+3", 3), ("GMT+4", 4), ("GMT+5", 5)]
            .into_iter()
            .filter_map(|(label, hours)| Self::from_hours(label, hours))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Shift a UTC instant into this zone
    pub fn convert(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc.with_timezone(&self.offset)
    }

    /// Local `HH:mm`
    pub fn format_time(&self, utc: DateTime<Utc>) -> String {
        self.convert(utc).format("%H:%M").to_string()
    }

    /// Local `dd.MM.yyyy`
    pub fn format_date(&self, utc: DateTime<Utc>) -> String {
        self.convert(utc).format("%d.%m.%Y").to_string()
    }

    /// Local `dd.MM.yyyy HH:mm`
    pub fn format_timestamp(&self, utc: DateTime<Utc>) -> String {
        self.convert(utc).format("%d.%m.%Y %H:%M").to_string()
    }
}

impl fmt::Display for ReportZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults_in_order() {
        let labels: Vec<_> = ReportZone::defaults().iter().map(|z| z.label()).collect();
        assert_eq!(labels, vec!["GMT+3", "GMT+4", "GMT+5"]);
    }

    #[test]
    fn test_conversion_crosses_midnight() {
        let zone = ReportZone::from_hours("GMT+4", 4).unwrap();
        let utc = Utc.with_ymd_and_hms(2025, 12, 22, 23, 10, 0).unwrap();

        assert_eq!(zone.format_time(utc), "03:10");
        assert_eq!(zone.format_date(utc), "23.12.2025");
        assert_eq!(zone.format_timestamp(utc), "23.12.2025 03:10");
    }

    #[test]
    fn test_time_is_zero_padded() {
        let zone = ReportZone::from_hours("GMT+3", 3).unwrap();
        let utc = Utc.with_ymd_and_hms(2025, 1, 5, 6, 5, 0).unwrap();

        assert_eq!(zone.format_time(utc), "09:05");
        assert_eq!(zone.format_date(utc), "05.01.2025");
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        assert!(ReportZone::from_hours("GMT+30", 30).is_none());
        assert!(ReportZone::from_hours("GMT-30", -30).is_none());
        assert!(ReportZone::from_hours("MAX", i32::MAX).is_none());
        assert!(ReportZone::from_hours("MIN", i32::MIN).is_none());
    }
}
