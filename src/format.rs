// "as of" line formatting

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::config::{DisplayConfig, TimestampUnit};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fixed timezone and timestamp unit used to render snapshot times.
#[derive(Debug, Clone, Copy)]
pub struct TimestampFormat {
    offset: FixedOffset,
    unit: TimestampUnit,
}

impl TimestampFormat {
    /// Falls back to UTC if the offset is out of range (config validation rejects that earlier).
    pub fn new(utc_offset_minutes: i32, unit: TimestampUnit) -> Self {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset, unit }
    }

    pub fn utc(unit: TimestampUnit) -> Self {
        Self::new(0, unit)
    }

    /// Renders "Mon DD, YYYY at hh:mm:ss AM/PM". `None` when the timestamp is missing
    /// or outside chrono's representable range.
    pub fn format(&self, timestamp: Option<i64>) -> Option<String> {
        let ts = timestamp?;
        let utc = match self.unit {
            TimestampUnit::Seconds => DateTime::from_timestamp(ts, 0)?,
            TimestampUnit::Milliseconds => DateTime::from_timestamp_millis(ts)?,
        };
        let local = utc.with_timezone(&self.offset);

        // Midnight hour stays "00 AM"; only 13..23 fold down.
        let hour = local.hour();
        let (display_hour, meridiem) = match hour {
            0..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour - 12, "PM"),
        };

        Some(format!(
            "{} {:02}, {} at {:02}:{:02}:{:02} {}",
            MONTHS[local.month0() as usize],
            local.day(),
            local.year(),
            display_hour,
            local.minute(),
            local.second(),
            meridiem
        ))
    }
}

impl From<&DisplayConfig> for TimestampFormat {
    fn from(display: &DisplayConfig) -> Self {
        Self::new(display.utc_offset_minutes, display.timestamp_unit)
    }
}
