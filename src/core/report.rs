use crate::core::hospital::Hospital;
use crate::domain::model::{
    AppointmentId, Doctor, DoctorId, Patient, PatientId, Person, TIME_FORMAT,
};
use crate::domain::ports::EventSink;
use crate::utils::error::{HospitalError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
pub struct AppointmentRow<'a> {
    pub appointment_id: AppointmentId,
    pub doctor_id: DoctorId,
    pub doctor_name: &'a str,
    pub patient_id: PatientId,
    pub patient_name: &'a str,
    pub date_time: String,
}

/// Read-only view of a hospital, in registration order.
#[derive(Debug, Serialize)]
pub struct HospitalSnapshot<'a> {
    pub name: &'a str,
    pub doctors: Vec<&'a Doctor>,
    pub patients: Vec<&'a Patient>,
    pub appointments: Vec<AppointmentRow<'a>>,
}

impl<'a> HospitalSnapshot<'a> {
    pub fn capture<S: EventSink>(hospital: &'a Hospital<S>) -> Self {
        let appointments = hospital
            .appointments()
            .filter_map(|appointment| hospital.details_for(appointment))
            .map(|details| AppointmentRow {
                appointment_id: details.appointment.appointment_id(),
                doctor_id: details.doctor.doctor_id(),
                doctor_name: details.doctor.name(),
                patient_id: details.patient.patient_id(),
                patient_name: details.patient.name(),
                date_time: details.appointment.date_time().format(TIME_FORMAT).to_string(),
            })
            .collect();

        Self {
            name: hospital.name(),
            doctors: hospital.doctors().collect(),
            patients: hospital.patients().collect(),
            appointments,
        }
    }
}

pub fn render<S: EventSink>(hospital: &Hospital<S>, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(hospital)),
        ReportFormat::Json => {
            let snapshot = HospitalSnapshot::capture(hospital);
            Ok(serde_json::to_string_pretty(&snapshot)?)
        }
        ReportFormat::Csv => render_csv(hospital),
    }
}

fn render_text<S: EventSink>(hospital: &Hospital<S>) -> String {
    let mut sections = vec![
        hospital.to_string(),
        hospital.display_doctors(),
        hospital.display_patients(),
        hospital.display_appointments(),
    ];
    for doctor in hospital.doctors() {
        if let Ok(schedule) = hospital.display_schedule(doctor.doctor_id()) {
            sections.push(schedule);
        }
    }
    sections.join("\n")
}

fn render_csv<S: EventSink>(hospital: &Hospital<S>) -> Result<String> {
    let snapshot = HospitalSnapshot::capture(hospital);
    let mut writer = csv::Writer::from_writer(Vec::new());
    if snapshot.appointments.is_empty() {
        writer.write_record([
            "appointment_id",
            "doctor_id",
            "doctor_name",
            "patient_id",
            "patient_name",
            "date_time",
        ])?;
    }
    for row in &snapshot.appointments {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HospitalError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
