use crate::domain::model::{AppointmentId, DoctorId, PatientId, TIME_FORMAT};
use crate::utils::error::EntityKind;
use chrono::NaiveDateTime;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventLevel::Info => "INFO",
            EventLevel::Warn => "WARNING",
            EventLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Everything a hospital reports to its sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HospitalEvent {
    DoctorAdded {
        doctor_id: DoctorId,
        name: String,
        specialization: String,
    },
    PatientAdded {
        patient_id: PatientId,
        name: String,
        ailment: String,
    },
    DuplicateIgnored {
        kind: EntityKind,
        id: u32,
    },
    AppointmentBooked {
        appointment_id: AppointmentId,
        doctor_name: String,
        patient_name: String,
        date_time: NaiveDateTime,
    },
    BookingRejected {
        appointment_id: AppointmentId,
        reason: String,
    },
}

impl HospitalEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            HospitalEvent::DoctorAdded { .. }
            | HospitalEvent::PatientAdded { .. }
            | HospitalEvent::AppointmentBooked { .. } => EventLevel::Info,
            HospitalEvent::DuplicateIgnored { .. } => EventLevel::Warn,
            HospitalEvent::BookingRejected { .. } => EventLevel::Error,
        }
    }
}

impl fmt::Display for HospitalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HospitalEvent::DoctorAdded {
                name,
                specialization,
                ..
            } => write!(f, "Added Doctor: {} ({}).", name, specialization),
            HospitalEvent::PatientAdded { name, ailment, .. } => {
                write!(f, "Added Patient: {} (Ailment: {}).", name, ailment)
            }
            HospitalEvent::DuplicateIgnored { kind, id } => {
                write!(f, "{} with ID {} already exists.", kind, id)
            }
            HospitalEvent::AppointmentBooked {
                appointment_id,
                doctor_name,
                patient_name,
                date_time,
            } => write!(
                f,
                "Appointment booked: Appointment[ID: {}, Patient: {}, Doctor: {}, Time: {}]",
                appointment_id,
                patient_name,
                doctor_name,
                date_time.format(TIME_FORMAT)
            ),
            HospitalEvent::BookingRejected {
                appointment_id,
                reason,
            } => write!(f, "Booking {} rejected: {}", appointment_id, reason),
        }
    }
}

/// Observer injected into a hospital at construction.
pub trait EventSink {
    fn record(&self, event: &HospitalEvent);
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn record(&self, event: &HospitalEvent) {
        (**self).record(event)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn record(&self, event: &HospitalEvent) {
        (**self).record(event)
    }
}

impl<T: EventSink + ?Sized> EventSink for Rc<T> {
    fn record(&self, event: &HospitalEvent) {
        (**self).record(event)
    }
}
