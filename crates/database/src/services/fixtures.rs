//! Stored rows shared by the service tests.

use crate::entities::{
    faculty_load, program, section_offering, section_offering_schedule, student, subject,
    year_section,
};
use chrono::NaiveTime;

pub fn offering_row(
    id: i64,
    semester: &str,
    year_level: &str,
    section: &str,
) -> section_offering::Model {
    section_offering::Model {
        id,
        program_id: 1,
        subject_id: 5,
        academic_year: "2024-2025".to_owned(),
        semester: semester.to_owned(),
        year_level: year_level.to_owned(),
        parent_section: section.to_owned(),
        slots: Some(40),
        lec_hours: None,
        lab_hours: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn schedule_row(
    id: i64,
    section_offering_id: i64,
    day: &str,
    start: (u32, u32),
    end: (u32, u32),
) -> section_offering_schedule::Model {
    section_offering_schedule::Model {
        id,
        section_offering_id,
        day: day.to_owned(),
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        room: Some("301".to_owned()),
        created_at: None,
        updated_at: None,
    }
}

pub fn no_schedules() -> Vec<section_offering_schedule::Model> {
    vec![]
}

pub fn program_row() -> program::Model {
    program::Model {
        id: 1,
        program_code: Some("BSIT".to_owned()),
        program_name: None,
    }
}

pub fn subject_row() -> subject::Model {
    subject::Model {
        id: 5,
        subject_code: Some("IT401".to_owned()),
        subject_name: Some("Capstone Project".to_owned()),
        lec_hours: Some(3),
        lab_hours: None,
        units: Some(3),
    }
}

/// A load of faculty 42 with no stored values besides the subject and section
pub fn load_row(id: i64, section_offering_id: Option<i64>) -> faculty_load::Model {
    faculty_load::Model {
        id,
        faculty_id: 42,
        section_offering_id,
        subject_id: None,
        subject_code: None,
        subject_description: None,
        lec_hours: None,
        lab_hours: None,
        units: None,
        section: None,
        schedule: None,
        room: None,
        load_type: "Part-time".to_owned(),
        academic_year: None,
        semester: None,
        created_at: None,
        updated_at: None,
    }
}

/// A manual load with its subject, section and term stored
pub fn manual_row(id: i64, code: &str, section: &str, semester: &str) -> faculty_load::Model {
    faculty_load::Model {
        subject_code: Some(code.to_owned()),
        subject_description: Some("Purposive Communication".to_owned()),
        lec_hours: Some(3),
        units: Some(3),
        section: Some(section.to_owned()),
        academic_year: Some("2024-2025".to_owned()),
        semester: Some(semester.to_owned()),
        ..load_row(id, None)
    }
}

pub fn student_row(
    id: i64,
    year_level: &str,
    section: &str,
) -> (student::Model, year_section::Model) {
    (
        student::Model {
            id,
            program_id: Some(1),
            year_section_id: Some(id),
            status: "Regular".to_owned(),
        },
        year_section::Model {
            id,
            year_level: year_level.to_owned(),
            section: section.to_owned(),
        },
    )
}
