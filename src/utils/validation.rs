use crate::utils::error::{HospitalError, Result};
use chrono::NaiveDateTime;
use serde_json::Value;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepted appointment timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 年齡必須是大於零的整數
pub fn is_valid_age(age: i64) -> bool {
    age > 0
}

/// Checks an age and converts it to `u64`, naming the person in the error.
pub fn validate_age(name: &str, age: i64) -> Result<u64> {
    let invalid = || HospitalError::InvalidAge {
        name: name.to_string(),
        age: age.to_string(),
    };
    if !is_valid_age(age) {
        return Err(invalid());
    }
    u64::try_from(age).map_err(|_| invalid())
}

/// Untyped ages (from roster files) must be integers; `"30"`, `30.5` and `true` are rejected.
/// Returns the raw integer once it has passed [`validate_age`].
pub fn validate_age_value(name: &str, age: &Value) -> Result<i64> {
    match age.as_i64() {
        Some(n) => validate_age(name, n).map(|_| n),
        None => Err(HospitalError::InvalidAge {
            name: name.to_string(),
            age: age.to_string(),
        }),
    }
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| HospitalError::InvalidTimestamp {
            value: value.to_string(),
            reason: format!("expected one of {}", TIMESTAMP_FORMATS.join(", ")),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HospitalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    validate_non_empty_string(field_name, path)?;

    if path.contains('\0') {
        return Err(HospitalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_valid_age() {
        assert!(is_valid_age(25));
        assert!(is_valid_age(1));
        assert!(!is_valid_age(0));
        assert!(!is_valid_age(-3));
        assert!(is_valid_age(1i64 << 32));
        assert!(is_valid_age(i64::MAX));
        assert_eq!(validate_age("x", 1i64 << 32).unwrap(), 1u64 << 32);
    }

    #[test]
    fn test_validate_age_value_rejects_non_integers() {
        assert_eq!(validate_age_value("a", &json!(30)).unwrap(), 30);
        assert!(matches!(
            validate_age_value("a", &json!("30")),
            Err(HospitalError::InvalidAge { .. })
        ));
        assert!(validate_age_value("a", &json!(30.5)).is_err());
        assert!(validate_age_value("a", &json!(true)).is_err());
        assert!(validate_age_value("a", &json!(-5)).is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 11, 26)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-11-26T10:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-11-26T10:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-11-26 10:00").unwrap(), expected);
        assert!(parse_timestamp("26/11/2024 10:00").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("hospital.name", "City Hospital").is_ok());
        assert!(validate_non_empty_string("hospital.name", "   ").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("log_file", "hospital.log").is_ok());
        assert!(validate_path("log_file", "").is_err());
        assert!(validate_path("log_file", "bad\0path").is_err());
    }
}
