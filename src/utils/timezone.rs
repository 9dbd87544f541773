use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Zone the timestamp is rendered in
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    /// Read a stored or typed zone. Absent, blank and `local` all mean the
    /// host zone; `utc`/`z` are accepted in any case.
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let raw = value.map(str::trim).unwrap_or_default();
        match raw.to_ascii_lowercase().as_str() {
            "" | "local" => Ok(Timezone::Local),
            "utc" | "z" => Ok(Timezone::Named(chrono_tz::UTC)),
            _ => raw
                .parse::<Tz>()
                .map(Timezone::Named)
                .map_err(|_| AppError::InvalidTimezone {
                    input: raw.to_string(),
                }),
        }
    }

    /// Canonical name to persist, `None` for the local zone
    pub(crate) fn setting_value(self) -> Option<String> {
        match self {
            Timezone::Local => None,
            Timezone::Named(tz) => Some(tz.name().to_string()),
        }
    }

    pub(crate) fn now(self) -> DateTime<FixedOffset> {
        self.at(Utc::now())
    }

    /// `instant` as wall-clock time in this zone, with the offset in effect
    pub(crate) fn at(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => with_fixed_offset(instant, &Local),
            Timezone::Named(tz) => with_fixed_offset(instant, &tz),
        }
    }
}

fn with_fixed_offset<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z) -> DateTime<FixedOffset> {
    let zoned = instant.with_timezone(zone);
    let offset = zoned.offset().fix();
    zoned.with_timezone(&offset)
}
