pub mod faculty_load;
pub mod program;
pub mod section_offering;
pub mod section_offering_schedule;
pub mod student;
pub mod subject;
pub mod year_section;

/// Hour and unit columns are signed integers; negative values read as unset
pub(crate) fn hours(value: Option<i32>) -> Option<u32> {
    value.and_then(|value| u32::try_from(value).ok())
}

pub(crate) fn stored_hours(value: Option<u32>) -> Option<i32> {
    value.and_then(|value| i32::try_from(value).ok())
}
