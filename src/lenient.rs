//! Tolerant decoders for the loosely-typed fields the server sends.
//!
//! Anomalies are never errors here: they decode to `None` and are logged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses `YYYY-MM-DD`, an RFC 3339 date-time or a naive `YYYY-MM-DDTHH:MM:SS` date-time.
/// Only the calendar date is kept (as written, no timezone conversion).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }
    for format in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    None
}

/// Parses `HH:MM:SS` (with optional fractional seconds) or `HH:MM`
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let parsed = parse_date(&s);
            if parsed.is_none() && s.trim().is_empty() == false {
                log::warn!("Ignoring unparseable date {:?}", s);
            }
            parsed
        },
        Some(other) => {
            log::warn!("Ignoring a date that is not a string: {}", other);
            None
        },
    })
}

pub fn time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if s.trim().is_empty() == false => {
            let parsed = parse_time(&s);
            if parsed.is_none() {
                log::warn!("Ignoring unparseable time {:?}", s);
            }
            parsed
        },
        _ => None,
    })
}

/// An integer reference that may come as a number, a numeric string, or null
pub fn reference<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                None
            } else {
                match s.trim().parse() {
                    Ok(id) => Some(id),
                    Err(_) => {
                        log::warn!("Ignoring invalid reference {:?}", s);
                        None
                    },
                }
            }
        },
        Some(other) => {
            log::warn!("Ignoring invalid reference {}", other);
            None
        },
    })
}

/// Free text that may be null, empty, or even a number
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if s.is_empty() == false => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_date("2024-03-09"), expected);
        assert_eq!(parse_date(" 2024-03-09 "), expected);
        assert_eq!(parse_date("2024-03-09T23:30:00Z"), expected);
        assert_eq!(parse_date("2024-03-09T23:30:00+02:00"), expected);
        assert_eq!(parse_date("2024-03-09T08:15:00.250"), expected);
        assert_eq!(parse_date("2024-03-09 08:15:00"), expected);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn times() {
        assert_eq!(parse_time("09:45"), NaiveTime::from_hms_opt(9, 45, 0));
        assert_eq!(parse_time("09:45:30"), NaiveTime::from_hms_opt(9, 45, 30));
        assert_eq!(parse_time("25:00"), None);
    }
}
