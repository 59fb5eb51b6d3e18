//! Field readers for hand-edited or migrated backend records
//!
//! Used with `#[serde(deserialize_with = ...)]`. Nulls, numbers sent as text
//! and text sent as numbers are mapped onto the field type; a value that
//! cannot be used falls back to the field's empty value instead of failing
//! the record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    let truncate = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Text; null becomes empty and numbers keep their digits
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional text; numbers keep their digits
pub fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(text(Value::deserialize(deserializer)?))
}

/// Whole number as `i32`; unusable input becomes 0
pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(integer(&value)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or_default())
}

/// Optional non-negative whole number
pub fn optional_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(integer(&value).and_then(|n| u32::try_from(n).ok()))
}

/// Enum label read through `From<String>`; null gives the default variant
pub fn label<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => T::default(),
        other => T::from(text(other).unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleStatus;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "optional_string")]
        plate: Option<String>,
        #[serde(default, deserialize_with = "int")]
        year: i32,
        #[serde(default, deserialize_with = "optional_u32")]
        km: Option<u32>,
        #[serde(default, deserialize_with = "label")]
        status: VehicleStatus,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_nulls_become_empty_values() {
        let r = row(r#"{"name": null, "plate": null, "year": null, "km": null, "status": null}"#);
        assert_eq!(r.name, "");
        assert_eq!(r.plate, None);
        assert_eq!(r.year, 0);
        assert_eq!(r.km, None);
        assert_eq!(r.status, VehicleStatus::Available);
    }

    #[test]
    fn test_numbers_as_text_and_text_as_numbers() {
        let r = row(r#"{"name": 207, "plate": 1234, "year": " 2019 ", "km": "45000.0", "status": "vendido"}"#);
        assert_eq!(r.name, "207");
        assert_eq!(r.plate.as_deref(), Some("1234"));
        assert_eq!(r.year, 2019);
        assert_eq!(r.km, Some(45000));
        assert_eq!(r.status, VehicleStatus::Sold);
    }

    #[test]
    fn test_unusable_values() {
        let r = row(r#"{"year": "novo", "km": -5, "status": 3}"#);
        assert_eq!(r.year, 0);
        assert_eq!(r.km, None);
        assert_eq!(r.status, VehicleStatus::Unavailable);
        assert_eq!(row(r#"{"year": 2019.0}"#).year, 2019);
    }
}
