use crate::core::hospital::DuplicatePolicy;
use crate::utils::error::{HospitalError, Result};
use crate::utils::validation::{parse_timestamp, validate_non_empty_string, Validate};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Initial data of a hospital, as read from a TOML roster file.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    pub hospital: HospitalSection,
    #[serde(default)]
    pub doctors: Vec<DoctorEntry>,
    #[serde(default)]
    pub patients: Vec<PatientEntry>,
    #[serde(default)]
    pub appointments: Vec<AppointmentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HospitalSection {
    pub name: String,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorEntry {
    pub id: u32,
    pub name: String,
    /// Kept untyped so a non-integer age surfaces as `InvalidAge`, not a parse error.
    pub age: Value,
    pub specialization: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientEntry {
    pub id: u32,
    pub name: String,
    pub age: Value,
    pub ailment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentEntry {
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    /// Either a quoted string or a bare TOML datetime (`2024-11-26T10:00:00`).
    #[serde(deserialize_with = "timestamp_text")]
    pub date_time: String,
}

fn timestamp_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(text) => Ok(text),
        toml::Value::Datetime(datetime) => Ok(datetime.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a date-time, found {}",
            other.type_str()
        ))),
    }
}

impl RosterConfig {
    /// 從 TOML 檔案載入名冊
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析名冊
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HospitalError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOSPITAL_NAME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HospitalError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The roster replayed when no file is given on the command line.
    pub fn demo() -> Self {
        let doctor = |id, name: &str, age: i64, specialization: &str| DoctorEntry {
            id,
            name: name.to_string(),
            age: Value::from(age),
            specialization: specialization.to_string(),
        };
        let patient = |id, name: &str, age: i64, ailment: &str| PatientEntry {
            id,
            name: name.to_string(),
            age: Value::from(age),
            ailment: ailment.to_string(),
        };
        let appointment = |id, patient_id, doctor_id, date_time: &str| AppointmentEntry {
            id,
            patient_id,
            doctor_id,
            date_time: date_time.to_string(),
        };

        Self {
            hospital: HospitalSection {
                name: "City Hospital".to_string(),
                duplicate_policy: DuplicatePolicy::Reject,
            },
            doctors: vec![
                doctor(1, "Dr. Doctor1", 45, "Cardiology"),
                doctor(2, "Dr. Doctor2", 50, "Neurology"),
            ],
            patients: vec![
                patient(101, "Patient_y", 30, "Chest Pain"),
                patient(102, "Patient_z", 45, "Headache"),
            ],
            appointments: vec![
                appointment(1, 101, 1, "2024-11-26T10:00"),
                appointment(2, 102, 2, "2024-11-26T14:00"),
            ],
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("hospital.name", &self.hospital.name)?;

        for (index, entry) in self.doctors.iter().enumerate() {
            validate_non_empty_string(&format!("doctors[{}].name", index), &entry.name)?;
        }
        for (index, entry) in self.patients.iter().enumerate() {
            validate_non_empty_string(&format!("patients[{}].name", index), &entry.name)?;
        }

        let mut seen = HashSet::new();
        for entry in &self.appointments {
            parse_timestamp(&entry.date_time)?;
            if !seen.insert(entry.id) && self.hospital.duplicate_policy == DuplicatePolicy::Reject {
                return Err(HospitalError::InvalidConfigValueError {
                    field: "appointments.id".to_string(),
                    value: entry.id.to_string(),
                    reason: "Appointment ID appears more than once".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_ROSTER: &str = r#"
[hospital]
name = "City Hospital"

[[doctors]]
id = 1
name = "Dr. Doctor1"
age = 45
specialization = "Cardiology"

[[patients]]
id = 101
name = "Patient_y"
age = 30
ailment = "Chest Pain"

[[appointments]]
id = 1
patient_id = 101
doctor_id = 1
date_time = "2024-11-26T10:00"
"#;

    #[test]
    fn test_parse_basic_roster() {
        let config = RosterConfig::from_toml_str(BASIC_ROSTER).unwrap();

        assert_eq!(config.hospital.name, "City Hospital");
        assert_eq!(config.hospital.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.doctors.len(), 1);
        assert_eq!(config.doctors[0].age, Value::from(45));
        assert_eq!(config.patients[0].ailment, "Chest Pain");
        assert_eq!(config.appointments[0].doctor_id, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lenient_policy_and_empty_sections() {
        let config = RosterConfig::from_toml_str(
            r#"
[hospital]
name = "Empty Clinic"
duplicate_policy = "ignore"
"#,
        )
        .unwrap();

        assert_eq!(config.hospital.duplicate_policy, DuplicatePolicy::Ignore);
        assert!(config.doctors.is_empty());
        assert!(config.appointments.is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_ROSTER_HOSPITAL_NAME", "General Hospital");

        let config = RosterConfig::from_toml_str(
            r#"
[hospital]
name = "${TEST_ROSTER_HOSPITAL_NAME}"
"#,
        )
        .unwrap();
        assert_eq!(config.hospital.name, "General Hospital");

        std::env::remove_var("TEST_ROSTER_HOSPITAL_NAME");
    }

    #[test]
    fn test_string_age_is_kept_for_later_validation() {
        let config = RosterConfig::from_toml_str(
            r#"
[hospital]
name = "City Hospital"

[[patients]]
id = 101
name = "Patient_1"
age = "30"
ailment = "Flu"
"#,
        )
        .unwrap();
        assert_eq!(config.patients[0].age, Value::from("30"));
    }

    #[test]
    fn test_bare_toml_datetime_is_accepted() {
        let config = RosterConfig::from_toml_str(
            r#"
[hospital]
name = "City Hospital"

[[appointments]]
id = 1
patient_id = 101
doctor_id = 1
date_time = 2024-11-26T10:00:00
"#,
        )
        .unwrap();

        assert_eq!(config.appointments[0].date_time, "2024-11-26T10:00:00");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_datetime_value_is_rejected() {
        let err = RosterConfig::from_toml_str(
            r#"
[hospital]
name = "City Hospital"

[[appointments]]
id = 1
patient_id = 101
doctor_id = 1
date_time = 10
"#,
        )
        .unwrap_err();
        assert!(matches!(err, HospitalError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RosterConfig::from_toml_str(BASIC_ROSTER).unwrap();
        config.appointments[0].date_time = "tomorrow morning".to_string();
        assert!(matches!(
            config.validate(),
            Err(HospitalError::InvalidTimestamp { .. })
        ));

        let mut config = RosterConfig::from_toml_str(BASIC_ROSTER).unwrap();
        config.hospital.name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = RosterConfig::from_toml_str(BASIC_ROSTER).unwrap();
        let repeat = config.appointments[0].clone();
        config.appointments.push(repeat);
        assert!(config.validate().is_err());
        config.hospital.duplicate_policy = DuplicatePolicy::Ignore;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let err = RosterConfig::from_toml_str("[hospital\nname = 1").unwrap_err();
        assert!(matches!(err, HospitalError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_ROSTER.as_bytes()).unwrap();

        let config = RosterConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.doctors[0].name, "Dr. Doctor1");
    }

    #[test]
    fn test_demo_roster_is_valid() {
        let config = RosterConfig::demo();
        assert!(config.validate().is_ok());
        assert_eq!(config.doctors.len(), 2);
        assert_eq!(config.appointments.len(), 2);
    }
}
