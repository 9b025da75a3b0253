use crate::core::registry::Registry;
use crate::domain::model::{
    Appointment, AppointmentId, Doctor, DoctorId, Patient, PatientId, Person, TIME_FORMAT,
};
use crate::domain::ports::{EventSink, HospitalEvent};
use crate::utils::error::{EntityKind, HospitalError, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// What to do when an id is registered twice. Applies to doctors, patients
/// and appointments alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    Ignored,
}

/// An appointment with its doctor and patient resolved.
#[derive(Debug, Clone, Copy)]
pub struct AppointmentDetails<'a> {
    pub appointment: &'a Appointment,
    pub doctor: &'a Doctor,
    pub patient: &'a Patient,
}

impl fmt::Display for AppointmentDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment[ID: {}, Patient: {}, Doctor: {}, Time: {}]",
            self.appointment.appointment_id(),
            self.patient.name(),
            self.doctor.name(),
            self.appointment.date_time().format(TIME_FORMAT)
        )
    }
}

pub struct Hospital<S: EventSink> {
    name: String,
    doctors: Registry<Doctor>,
    patients: Registry<Patient>,
    appointments: Registry<Rc<Appointment>>,
    policy: DuplicatePolicy,
    sink: S,
}

impl<S: EventSink> Hospital<S> {
    pub fn new(name: impl Into<String>, sink: S) -> Self {
        Self {
            name: name.into(),
            doctors: Registry::new(),
            patients: Registry::new(),
            appointments: Registry::new(),
            policy: DuplicatePolicy::default(),
            sink,
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn add_doctor(&mut self, doctor: Doctor) -> Result<Registration> {
        let id = doctor.doctor_id();
        let event = HospitalEvent::DoctorAdded {
            doctor_id: id,
            name: doctor.name().to_string(),
            specialization: doctor.specialization().to_string(),
        };
        if self.doctors.insert_new(id, doctor).is_err() {
            return self.duplicate(EntityKind::Doctor, id);
        }
        tracing::debug!(doctor_id = id, "doctor registered");
        self.sink.record(&event);
        Ok(Registration::Added)
    }

    pub fn add_patient(&mut self, patient: Patient) -> Result<Registration> {
        let id = patient.patient_id();
        let event = HospitalEvent::PatientAdded {
            patient_id: id,
            name: patient.name().to_string(),
            ailment: patient.ailment().to_string(),
        };
        if self.patients.insert_new(id, patient).is_err() {
            return self.duplicate(EntityKind::Patient, id);
        }
        tracing::debug!(patient_id = id, "patient registered");
        self.sink.record(&event);
        Ok(Registration::Added)
    }

    /// Books `patient_id` with `doctor_id`. Nothing is mutated unless both
    /// exist and the appointment id is free.
    pub fn book_appointment(
        &mut self,
        appointment_id: AppointmentId,
        patient_id: PatientId,
        doctor_id: DoctorId,
        date_time: NaiveDateTime,
    ) -> Result<Registration> {
        let (doctor_name, patient_name) = match self.resolve_pair(doctor_id, patient_id) {
            Ok((doctor, patient)) => (doctor.name().to_string(), patient.name().to_string()),
            Err(err) => return Err(self.reject_booking(appointment_id, err)),
        };

        let appointment = Rc::new(Appointment::new(
            appointment_id,
            doctor_id,
            patient_id,
            date_time,
        ));
        if self
            .appointments
            .insert_new(appointment_id, Rc::clone(&appointment))
            .is_err()
        {
            return self
                .duplicate(EntityKind::Appointment, appointment_id)
                .map_err(|err| self.reject_booking(appointment_id, err));
        }
        if let Some(doctor) = self.doctors.get_mut(doctor_id) {
            doctor.add_to_schedule(appointment);
        }

        self.sink.record(&HospitalEvent::AppointmentBooked {
            appointment_id,
            doctor_name,
            patient_name,
            date_time,
        });
        Ok(Registration::Added)
    }

    fn resolve_pair(
        &self,
        doctor_id: DoctorId,
        patient_id: PatientId,
    ) -> Result<(&Doctor, &Patient)> {
        let doctor = self
            .doctors
            .get(doctor_id)
            .ok_or(HospitalError::EntityNotFound {
                kind: EntityKind::Doctor,
                id: doctor_id,
            })?;
        let patient = self
            .patients
            .get(patient_id)
            .ok_or(HospitalError::EntityNotFound {
                kind: EntityKind::Patient,
                id: patient_id,
            })?;
        Ok((doctor, patient))
    }

    fn reject_booking(&self, appointment_id: AppointmentId, err: HospitalError) -> HospitalError {
        self.sink.record(&HospitalEvent::BookingRejected {
            appointment_id,
            reason: err.to_string(),
        });
        err
    }

    fn duplicate(&self, kind: EntityKind, id: u32) -> Result<Registration> {
        match self.policy {
            DuplicatePolicy::Reject => Err(HospitalError::DuplicateEntity { kind, id }),
            DuplicatePolicy::Ignore => {
                self.sink.record(&HospitalEvent::DuplicateIgnored { kind, id });
                Ok(Registration::Ignored)
            }
        }
    }

    pub fn doctor(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.get(id)
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.get(id)
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Rc<Appointment>> {
        self.appointments.get(id)
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.values()
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    pub fn appointments(&self) -> impl Iterator<Item = &Rc<Appointment>> {
        self.appointments.values()
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    pub fn appointment_details(&self, id: AppointmentId) -> Option<AppointmentDetails<'_>> {
        self.appointments.get(id).and_then(|a| self.details_for(a))
    }

    pub(crate) fn details_for<'a>(
        &'a self,
        appointment: &'a Appointment,
    ) -> Option<AppointmentDetails<'a>> {
        let doctor = self.doctors.get(appointment.doctor_id())?;
        let patient = self.patients.get(appointment.patient_id())?;
        Some(AppointmentDetails {
            appointment,
            doctor,
            patient,
        })
    }

    pub fn display_doctors(&self) -> String {
        let mut out = String::from("Doctors in the hospital:\n");
        for doctor in self.doctors.values() {
            out.push_str(&doctor.get_details());
            out.push('\n');
        }
        out
    }

    pub fn display_patients(&self) -> String {
        let mut out = String::from("Patients in the hospital:\n");
        for patient in self.patients.values() {
            out.push_str(&patient.get_details());
            out.push('\n');
        }
        out
    }

    pub fn display_appointments(&self) -> String {
        let mut out = String::from("Appointments in the hospital:\n");
        if self.appointments.is_empty() {
            out.push_str("  No appointments scheduled.\n");
            return out;
        }
        for appointment in self.appointments.values() {
            if let Some(details) = self.details_for(appointment) {
                out.push_str(&details.to_string());
                out.push('\n');
            }
        }
        out
    }

    /// Like [`Doctor::display_schedule`], with patient names resolved.
    pub fn display_schedule(&self, doctor_id: DoctorId) -> Result<String> {
        let doctor = self
            .doctors
            .get(doctor_id)
            .ok_or(HospitalError::EntityNotFound {
                kind: EntityKind::Doctor,
                id: doctor_id,
            })?;

        let mut out = format!(
            "Schedule for Dr. {} ({}):\n",
            doctor.name(),
            doctor.specialization()
        );
        if doctor.schedule().is_empty() {
            out.push_str("  No appointments scheduled.\n");
        }
        for appointment in doctor.schedule() {
            if let Some(details) = self.details_for(appointment) {
                out.push_str(&format!("  {}\n", details));
            }
        }
        Ok(out)
    }
}

impl<S: EventSink> fmt::Display for Hospital<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hospital[{}]: {} doctors, {} patients.",
            self.name,
            self.doctors.len(),
            self.patients.len()
        )
    }
}
