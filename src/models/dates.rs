//! Forgiving date handling for backend records
//!
//! The backend hands out either plain dates (`2025-01-15`) or full timestamps
//! (`2025-01-15T13:45:00+00:00`). Only the calendar date matters here; anything
//! unparsable is treated as "no date".

use chrono::NaiveDate;

/// Parse the leading `YYYY-MM-DD` of a string
pub fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Serde adapter for `Option<NaiveDate>` fields that must never fail to load
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => super::parse_date_prefix(&s),
            _ => None,
        })
    }
}
