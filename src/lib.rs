pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::sink::{FanoutSink, FileLogSink, MemorySink, NullSink, TracingSink};
pub use crate::config::roster_config::RosterConfig;
pub use crate::core::hospital::{AppointmentDetails, DuplicatePolicy, Hospital, Registration};
pub use crate::core::report::{render, ReportFormat};
pub use crate::core::roster::{load_roster, LoadSummary};
pub use crate::domain::model::{Appointment, Doctor, Patient, Person};
pub use crate::domain::ports::{EventLevel, EventSink, HospitalEvent};
pub use crate::utils::error::{EntityKind, HospitalError, Result};
