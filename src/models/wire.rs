//! Lenient deserializers for backend JSON
//!
//! Depending on the database driver the API returns integers as numbers or as
//! numeric strings, and dates as `YYYY-MM-DD` or as full timestamps.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// Integer sent either as a JSON number or as a numeric string
pub(crate) fn int_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => {
            T::try_from(n).map_err(|_| de::Error::custom(format!("integer out of range: {}", n)))
        }
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid integer: {:?}", s))),
    }
}

/// Calendar date; a timestamp is truncated to its date part
pub(crate) fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {:?}", raw)))
}

pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y/%m/%d"))
        .ok()
}

/// Optional timestamp; anything unparseable reads as `None`
pub(crate) fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// `null` reads as the default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "int_or_string")]
        month: u32,
        #[serde(deserialize_with = "calendar_date")]
        date: NaiveDate,
        #[serde(default, deserialize_with = "opt_timestamp")]
        created_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_numbers_and_strings() {
        let a: Row = serde_json::from_str(r#"{"month": 3, "date": "2024-03-05"}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"month": "3", "date": "2024-03-05"}"#).unwrap();
        assert_eq!(a.month, 3);
        assert_eq!(b.month, 3);
        assert!(a.created_at.is_none());
    }

    #[test]
    fn test_negative_month_rejected() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"month": -1, "date": "2024-03-05"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_timestamp_date_truncated() {
        let row: Row = serde_json::from_str(
            r#"{"month": 1, "date": "2024-12-31T18:30:00.000000Z", "created_at": "2024-12-31 18:30:00"}"#,
        )
        .unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        let created = row.created_at.unwrap();
        assert_eq!(created.year(), 2024);
        assert_eq!(created.hour(), 18);
    }

    #[test]
    fn test_rfc3339_with_fraction() {
        let ts = parse_timestamp("2024-11-02T10:15:00.000000Z").unwrap();
        assert_eq!(ts.minute(), 15);
        assert!(parse_timestamp("yesterday").is_none());
    }
}
