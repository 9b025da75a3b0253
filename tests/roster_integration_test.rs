use anyhow::Result;
use hospital_registry::{
    load_roster, render, FanoutSink, FileLogSink, HospitalError, MemorySink, ReportFormat,
    RosterConfig,
};
use std::rc::Rc;
use tempfile::TempDir;

/// 測試從檔案載入名冊並寫入事件日誌
#[test]
fn test_roster_file_with_event_log() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let roster_path = temp_dir.path().join("roster.toml");
    let log_path = temp_dir.path().join("hospital.log");

    std::fs::write(
        &roster_path,
        r#"
[hospital]
name = "Riverside Clinic"

[[doctors]]
id = 7
name = "Dr. House"
age = 52
specialization = "Diagnostics"

[[patients]]
id = 300
name = "Rebecca"
age = 29
ailment = "Fever"

[[appointments]]
id = 1
patient_id = 300
doctor_id = 7
date_time = "2024-11-30 09:00"
"#,
    )?;

    let roster = RosterConfig::from_file(&roster_path)?;
    let memory = Rc::new(MemorySink::new());
    let sink = FanoutSink::new()
        .with(Rc::clone(&memory))
        .with(FileLogSink::open(&log_path)?);

    let (hospital, summary) = load_roster(&roster, sink)?;
    assert_eq!(summary.added, 3);
    assert_eq!(hospital.to_string(), "Hospital[Riverside Clinic]: 1 doctors, 1 patients.");
    assert_eq!(memory.len(), 3);

    let log = std::fs::read_to_string(&log_path)?;
    assert_eq!(log.lines().count(), 3);
    assert!(log.contains(" - INFO - Added Doctor: Dr. House (Diagnostics)."));
    assert!(log.contains("Appointment[ID: 1, Patient: Rebecca, Doctor: Dr. House, Time: 2024-11-30 09:00:00]"));
    Ok(())
}

#[test]
fn test_duplicate_doctor_in_strict_roster() -> Result<()> {
    let roster = RosterConfig::from_toml_str(
        r#"
[hospital]
name = "City Hospital"

[[doctors]]
id = 1
name = "Dr. Doctor1"
age = 45
specialization = "Cardiology"

[[doctors]]
id = 1
name = "Dr. Again"
age = 41
specialization = "Surgery"
"#,
    )?;

    let memory = MemorySink::new();
    let err = load_roster(&roster, &memory).err().unwrap();
    assert!(matches!(err, HospitalError::DuplicateEntity { .. }));
    assert_eq!(memory.len(), 1);
    Ok(())
}

#[test]
fn test_demo_roster_renders_every_format() -> Result<()> {
    let memory = MemorySink::new();
    let (hospital, _) = load_roster(&RosterConfig::demo(), &memory)?;

    let text = render(&hospital, ReportFormat::Text)?;
    assert!(text.contains("Doctor[ID: 2, Name: Dr. Doctor2, Specialization: Neurology]"));
    assert!(text.contains("Schedule for Dr. Dr. Doctor2 (Neurology):"));

    let json: serde_json::Value = serde_json::from_str(&render(&hospital, ReportFormat::Json)?)?;
    assert_eq!(json["appointments"].as_array().map(|a| a.len()), Some(2));

    let csv = render(&hospital, ReportFormat::Csv)?;
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("2,2,Dr. Doctor2,102,Patient_z,2024-11-26 14:00:00"));
    Ok(())
}
