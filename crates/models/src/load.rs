use crate::academic::SectionOffering;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Employment basis of a faculty load
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum LoadKind {
    #[strum(serialize = "Full-time")]
    #[serde(rename = "Full-time")]
    FullTime,
    #[default]
    #[strum(serialize = "Part-time")]
    #[serde(rename = "Part-time")]
    PartTime,
}

/// Descriptive fields stored directly on a faculty load.
///
/// When the load links a section offering, every field is optional and acts as
/// an override. For manual loads these are the only source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDetails {
    pub subject_code: Option<String>,
    pub subject_description: Option<String>,
    pub lec_hours: Option<u32>,
    pub lab_hours: Option<u32>,
    pub units: Option<u32>,
    pub section: Option<String>,
    pub schedule: Option<String>,
    pub room: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
}

impl LoadDetails {
    /// Applies a partial update: only fields set on `patch` change
    pub fn apply(&mut self, patch: LoadDetails) {
        fn take<T>(field: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *field = value;
            }
        }

        take(&mut self.subject_code, patch.subject_code);
        take(&mut self.subject_description, patch.subject_description);
        take(&mut self.lec_hours, patch.lec_hours);
        take(&mut self.lab_hours, patch.lab_hours);
        take(&mut self.units, patch.units);
        take(&mut self.section, patch.section);
        take(&mut self.schedule, patch.schedule);
        take(&mut self.room, patch.room);
        take(&mut self.academic_year, patch.academic_year);
        take(&mut self.semester, patch.semester);
    }
}

/// Assignment of a subject to a faculty member for one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyLoad {
    pub id: i64,
    pub faculty_id: i64,
    pub section_offering_id: Option<i64>,
    /// Preloaded offering; `None` for manual loads
    pub section_offering: Option<SectionOffering>,
    pub kind: LoadKind,
    pub details: LoadDetails,
}

/// A faculty load that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFacultyLoad {
    pub faculty_id: i64,
    pub section_offering: Option<SectionOffering>,
    pub kind: LoadKind,
    pub details: LoadDetails,
}
