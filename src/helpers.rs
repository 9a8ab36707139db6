use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::error::Error;

pub const DP_ID_LENGTH: usize = 6;
pub const DEPOSIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest `NUMERIC` Postgres stores: digits before and after the point.
pub const AMOUNT_MAX_INTEGER_DIGITS: i64 = 131_072;
pub const AMOUNT_MAX_SCALE: i64 = 16_383;

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Intent::Create => write!(f, "create"),
            Intent::Update => write!(f, "update"),
            Intent::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for Intent {
    type Err = Error;

    fn from_str(value: &str) -> Result<Intent, Self::Err> {
        match value {
            "create" => Ok(Intent::Create),
            "update" => Ok(Intent::Update),
            "delete" => Ok(Intent::Delete),
            _ => Err(Error::InvalidOption {
                option: value.to_owned(),
            }),
        }
    }
}

/// Parses a submitted deposit date and truncates it to whole seconds.
///
/// Values carrying an offset (RFC 3339) are converted to UTC, naive
/// date-times are taken as-is and a bare date means midnight.
pub fn parse_deposit_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| {
            NAIVE_DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    parsed.with_nanosecond(0)
}

pub fn format_deposit_date(value: &NaiveDateTime) -> String {
    value.format(DEPOSIT_DATE_FORMAT).to_string()
}

/// Trimmed value, or `None` when the field is absent or blank.
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

pub mod deposit_date_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{format_deposit_date, parse_deposit_date};

    pub fn serialize<S>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&format_deposit_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|v| {
                parse_deposit_date(&v).ok_or_else(|| {
                    de::Error::custom(format!("invalid deposit date {}", v))
                })
            })
            .transpose()
    }
}
