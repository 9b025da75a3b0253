use std::fmt;
use thiserror::Error;

/// Which registry an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Doctor,
    Patient,
    Appointment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Doctor => "Doctor",
            EntityKind::Patient => "Patient",
            EntityKind::Appointment => "Appointment",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("Invalid age for {name}: {age}. Age must be a positive integer.")]
    InvalidAge { name: String, age: String },

    #[error("{kind} with ID {id} is already registered.")]
    DuplicateEntity { kind: EntityKind, id: u32 },

    #[error("{kind} with ID {id} not found.")]
    EntityNotFound { kind: EntityKind, id: u32 },

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Registry,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl HospitalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HospitalError::InvalidAge { .. } | HospitalError::InvalidTimestamp { .. } => {
                ErrorCategory::Validation
            }
            HospitalError::DuplicateEntity { .. } | HospitalError::EntityNotFound { .. } => {
                ErrorCategory::Registry
            }
            HospitalError::ConfigValidationError { .. }
            | HospitalError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            HospitalError::IoError(_)
            | HospitalError::SerializationError(_)
            | HospitalError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Registry => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            HospitalError::InvalidAge { .. } => {
                "Provide a whole number greater than zero for the age".to_string()
            }
            HospitalError::DuplicateEntity { kind, .. } => format!(
                "Use a fresh {} ID, or run with --lenient to skip duplicates",
                kind.to_string().to_lowercase()
            ),
            HospitalError::EntityNotFound { kind, .. } => format!(
                "Register the {} before booking an appointment",
                kind.to_string().to_lowercase()
            ),
            HospitalError::InvalidTimestamp { .. } => {
                "Use the format YYYY-MM-DDTHH:MM[:SS], e.g. 2024-11-26T10:00".to_string()
            }
            HospitalError::ConfigValidationError { .. }
            | HospitalError::InvalidConfigValueError { .. } => {
                "Check the roster file against the documented layout".to_string()
            }
            HospitalError::IoError(_) => {
                "Check that the file exists and is readable/writable".to_string()
            }
            HospitalError::SerializationError(_) | HospitalError::CsvError(_) => {
                "Retry with --format text".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::Registry => format!("Registry operation failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, HospitalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_errors_are_medium_severity() {
        let err = HospitalError::EntityNotFound {
            kind: EntityKind::Doctor,
            id: 7,
        };
        assert_eq!(err.category(), ErrorCategory::Registry);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "Doctor with ID 7 not found.");
        assert!(err.recovery_suggestion().contains("doctor"));
    }

    #[test]
    fn test_severity_per_category() {
        let invalid_age = HospitalError::InvalidAge {
            name: "x".to_string(),
            age: "0".to_string(),
        };
        let duplicate = HospitalError::DuplicateEntity {
            kind: EntityKind::Appointment,
            id: 1,
        };
        assert_eq!(invalid_age.severity(), ErrorSeverity::High);
        assert_eq!(duplicate.severity(), ErrorSeverity::Medium);
        assert!(duplicate.severity() < invalid_age.severity());
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = HospitalError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("System error"));
    }
}
