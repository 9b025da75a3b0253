pub mod hospital;
pub mod registry;
pub mod report;
pub mod roster;

pub use crate::domain::model::{Appointment, Doctor, Patient, Person};
pub use crate::domain::ports::{EventSink, HospitalEvent};
pub use crate::utils::error::Result;
