use crate::utils::error::Result;
use crate::utils::validation::validate_age;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

pub type DoctorId = u32;
pub type PatientId = u32;
pub type AppointmentId = u32;

/// Display format for appointment timestamps.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identity shared by everyone the hospital keeps on record.
pub trait Person {
    fn name(&self) -> &str;
    fn age(&self) -> u64;
    fn get_details(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Doctor {
    doctor_id: DoctorId,
    name: String,
    age: u64,
    specialization: String,
    #[serde(skip)]
    schedule: Vec<Rc<Appointment>>,
}

impl Doctor {
    pub fn new(
        doctor_id: DoctorId,
        name: impl Into<String>,
        age: i64,
        specialization: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let age = validate_age(&name, age)?;
        Ok(Self {
            doctor_id,
            name,
            age,
            specialization: specialization.into(),
            schedule: Vec::new(),
        })
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn schedule(&self) -> &[Rc<Appointment>] {
        &self.schedule
    }

    /// Appends a booked appointment. Only the owning hospital calls this.
    pub(crate) fn add_to_schedule(&mut self, appointment: Rc<Appointment>) {
        self.schedule.push(appointment);
    }

    pub fn display_schedule(&self) -> String {
        let mut out = format!(
            "Schedule for Dr. {} ({}):\n",
            self.name, self.specialization
        );
        if self.schedule.is_empty() {
            out.push_str("  No appointments scheduled.\n");
        } else {
            for appointment in &self.schedule {
                out.push_str(&format!(
                    "  Appointment[ID: {}, Patient ID: {}, Time: {}]\n",
                    appointment.appointment_id(),
                    appointment.patient_id(),
                    appointment.date_time().format(TIME_FORMAT)
                ));
            }
        }
        out
    }
}

impl Person for Doctor {
    fn name(&self) -> &str {
        &self.name
    }

    fn age(&self) -> u64 {
        self.age
    }

    fn get_details(&self) -> String {
        format!(
            "Doctor[ID: {}, Name: {}, Specialization: {}]",
            self.doctor_id, self.name, self.specialization
        )
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_details())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patient {
    patient_id: PatientId,
    name: String,
    age: u64,
    ailment: String,
}

impl Patient {
    pub fn new(
        patient_id: PatientId,
        name: impl Into<String>,
        age: i64,
        ailment: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let age = validate_age(&name, age)?;
        Ok(Self {
            patient_id,
            name,
            age,
            ailment: ailment.into(),
        })
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn ailment(&self) -> &str {
        &self.ailment
    }
}

impl Person for Patient {
    fn name(&self) -> &str {
        &self.name
    }

    fn age(&self) -> u64 {
        self.age
    }

    fn get_details(&self) -> String {
        format!(
            "Patient[ID: {}, Name: {}, Ailment: {}]",
            self.patient_id, self.name, self.ailment
        )
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_details())
    }
}

/// A booking between one doctor and one patient. Doctor and patient are
/// referenced by id and resolved through the hospital that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    appointment_id: AppointmentId,
    doctor_id: DoctorId,
    patient_id: PatientId,
    date_time: NaiveDateTime,
}

impl Appointment {
    pub(crate) fn new(
        appointment_id: AppointmentId,
        doctor_id: DoctorId,
        patient_id: PatientId,
        date_time: NaiveDateTime,
    ) -> Self {
        Self {
            appointment_id,
            doctor_id,
            patient_id,
            date_time,
        }
    }

    pub fn appointment_id(&self) -> AppointmentId {
        self.appointment_id
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }
}
