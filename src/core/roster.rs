use crate::config::roster_config::RosterConfig;
use crate::core::hospital::{Hospital, Registration};
use crate::domain::model::{Doctor, Patient};
use crate::domain::ports::EventSink;
use crate::utils::error::Result;
use crate::utils::validation::{parse_timestamp, validate_age_value};

/// Counts of what a roster replay registered and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub added: usize,
    pub ignored: usize,
}

impl LoadSummary {
    fn count(&mut self, registration: Registration) {
        match registration {
            Registration::Added => self.added += 1,
            Registration::Ignored => self.ignored += 1,
        }
    }
}

/// Builds a hospital from `roster`: doctors, then patients, then bookings,
/// each in document order. The first failure aborts the replay.
pub fn load_roster<S: EventSink>(
    roster: &RosterConfig,
    sink: S,
) -> Result<(Hospital<S>, LoadSummary)> {
    let mut hospital = Hospital::new(roster.hospital.name.clone(), sink)
        .with_policy(roster.hospital.duplicate_policy);
    let mut summary = LoadSummary::default();

    for entry in &roster.doctors {
        let age = validate_age_value(&entry.name, &entry.age)?;
        let doctor = Doctor::new(
            entry.id,
            entry.name.clone(),
            age,
            entry.specialization.clone(),
        )?;
        summary.count(hospital.add_doctor(doctor)?);
    }

    for entry in &roster.patients {
        let age = validate_age_value(&entry.name, &entry.age)?;
        let patient = Patient::new(
            entry.id,
            entry.name.clone(),
            age,
            entry.ailment.clone(),
        )?;
        summary.count(hospital.add_patient(patient)?);
    }

    for entry in &roster.appointments {
        let date_time = parse_timestamp(&entry.date_time)?;
        let registration =
            hospital.book_appointment(entry.id, entry.patient_id, entry.doctor_id, date_time)?;
        summary.count(registration);
    }

    tracing::debug!(
        added = summary.added,
        ignored = summary.ignored,
        "roster replay finished"
    );
    Ok((hospital, summary))
}
