use models::schedule::ScheduleError;
use thiserror::Error;

/// Rejections when creating a faculty load
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{field} is required when not linking to a section offering")]
    MissingRequiredField { field: &'static str },

    #[error(
        "this subject is already assigned to faculty {faculty_id} for the selected academic period (load {existing_load_id})"
    )]
    DuplicateAssignment {
        faculty_id: i64,
        existing_load_id: i64,
    },
}

/// Rejections when creating or editing a section offering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferingError {
    #[error("this subject is already offered in this section (offering {existing_id})")]
    DuplicateOffering { existing_id: i64 },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
