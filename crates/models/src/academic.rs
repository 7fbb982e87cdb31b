use crate::schedule::ScheduleEntry;
use serde::{Deserialize, Serialize};

/// A degree program (e.g. "BSIT")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub code: Option<String>,
    pub name: Option<String>,
}

impl Program {
    /// Code used in section labels, falling back to the program name
    pub fn display_code(&self) -> Option<&str> {
        [self.code.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

/// A subject from the curriculum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub code: Option<String>,
    pub name: Option<String>,
    pub lec_hours: Option<u32>,
    pub lab_hours: Option<u32>,
    pub units: Option<u32>,
}

/// One subject taught to one program/year/section in one academic term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOffering {
    pub id: i64,
    pub program_id: i64,
    pub subject_id: i64,
    /// Preloaded program, if the data store resolved it
    pub program: Option<Program>,
    /// Preloaded subject, if the data store resolved it
    pub subject: Option<Subject>,
    pub academic_year: String,
    pub semester: String,
    pub year_level: String,
    /// Section letter or code, possibly with a directional suffix (e.g. "A-West")
    pub parent_section: String,
    pub lec_hours: Option<u32>,
    pub lab_hours: Option<u32>,
    pub slots: Option<u32>,
    /// Weekly meetings in entry order
    pub schedules: Vec<ScheduleEntry>,
}

/// Partial update of an offering; unset fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingPatch {
    pub program_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub year_level: Option<String>,
    pub parent_section: Option<String>,
    pub lec_hours: Option<u32>,
    pub lab_hours: Option<u32>,
    pub slots: Option<u32>,
}

impl SectionOffering {
    /// Applies `patch`; a changed program or subject drops the preloaded record
    pub fn apply(&mut self, patch: OfferingPatch) {
        if let Some(program_id) = patch.program_id
            && program_id != self.program_id
        {
            self.program_id = program_id;
            self.program = None;
        }
        if let Some(subject_id) = patch.subject_id
            && subject_id != self.subject_id
        {
            self.subject_id = subject_id;
            self.subject = None;
        }

        let text_fields = [
            (&mut self.academic_year, patch.academic_year),
            (&mut self.semester, patch.semester),
            (&mut self.year_level, patch.year_level),
            (&mut self.parent_section, patch.parent_section),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                *field = value.trim().to_owned();
            }
        }

        self.lec_hours = patch.lec_hours.or(self.lec_hours);
        self.lab_hours = patch.lab_hours.or(self.lab_hours);
        self.slots = patch.slots.or(self.slots);
    }
}

/// A student placed in a year level and section of a program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub program_id: Option<i64>,
    pub year_level: String,
    pub section: String,
}
