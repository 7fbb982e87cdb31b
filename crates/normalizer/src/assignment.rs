//! Validation for new faculty loads.

use crate::{canonical::same_semester, enrichment::enrich, error::LoadError};
use log::debug;
use models::{
    academic::SectionOffering,
    load::{FacultyLoad, LoadDetails, NewFacultyLoad},
};

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Compares optional term values; two absent values are equal
fn same_optional(a: Option<&str>, b: Option<&str>, eq: impl Fn(&str, &str) -> bool) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) => eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Checks a draft against the rules for creating a faculty load.
///
/// `existing` holds the loads already stored for the faculty member. Nothing
/// is written here, so a rejected draft leaves no partial state.
pub fn validate_new_load(
    draft: &NewFacultyLoad,
    existing: &[FacultyLoad],
) -> Result<(), LoadError> {
    let details = &draft.details;

    if draft.section_offering.is_none() {
        if is_blank(details.subject_code.as_deref()) {
            return Err(LoadError::MissingRequiredField {
                field: "subject code",
            });
        }
        if is_blank(details.subject_description.as_deref()) {
            return Err(LoadError::MissingRequiredField {
                field: "subject description",
            });
        }
    }

    let mut same_faculty = existing
        .iter()
        .filter(|load| load.faculty_id == draft.faculty_id);

    let duplicate = match &draft.section_offering {
        Some(offering) => same_faculty.find(|load| load.section_offering_id == Some(offering.id)),
        None => same_faculty.find(|load| {
            let current = enrich(load);

            same_optional(
                current.subject_code.as_deref(),
                details.subject_code.as_deref(),
                |a, b| a.eq_ignore_ascii_case(b),
            ) && same_optional(
                current.academic_year.as_deref(),
                details.academic_year.as_deref(),
                |a, b| a == b,
            ) && same_optional(
                current.semester.as_deref(),
                details.semester.as_deref(),
                same_semester,
            )
        }),
    };

    match duplicate {
        Some(load) => {
            debug!(
                "Rejecting load for faculty {}: duplicates load {}",
                draft.faculty_id, load.id
            );
            Err(LoadError::DuplicateAssignment {
                faculty_id: draft.faculty_id,
                existing_load_id: load.id,
            })
        }
        None => Ok(()),
    }
}

/// Checks an edited load against the faculty member's other loads.
///
/// `existing` may include the load itself; it is skipped.
pub fn validate_update(load: &FacultyLoad, existing: &[FacultyLoad]) -> Result<(), LoadError> {
    let others: Vec<FacultyLoad> = existing
        .iter()
        .filter(|other| other.id != load.id)
        .cloned()
        .collect();

    let draft = NewFacultyLoad {
        faculty_id: load.faculty_id,
        section_offering: load.section_offering.clone(),
        kind: load.kind,
        details: load.details.clone(),
    };

    validate_new_load(&draft, &others)
}

/// Moves a load onto another offering, or turns it into a manual load.
///
/// Linking clears the stored values the offering supplies, so the new
/// offering is not shadowed by the old one's data; the room is kept.
/// Unlinking freezes the currently resolved values into the stored fields,
/// with the section stored as its display label.
pub fn relink(load: FacultyLoad, offering: Option<SectionOffering>) -> FacultyLoad {
    match offering {
        Some(offering) => FacultyLoad {
            section_offering_id: Some(offering.id),
            section_offering: Some(offering),
            details: LoadDetails {
                room: load.details.room,
                ..Default::default()
            },
            ..load
        },
        None if load.section_offering.is_none() => FacultyLoad {
            section_offering_id: None,
            ..load
        },
        None => {
            let enriched = enrich(&load);
            let label = enriched.section_label();
            let mut manual = enriched.into_load();
            manual.details.section = label;
            manual.section_offering_id = None;
            manual.section_offering = None;
            manual
        }
    }
}

/// Turns a validated draft into a load with the id assigned by the store
pub fn into_load(draft: NewFacultyLoad, id: i64) -> FacultyLoad {
    FacultyLoad {
        id,
        faculty_id: draft.faculty_id,
        section_offering_id: draft.section_offering.as_ref().map(|offering| offering.id),
        section_offering: draft.section_offering,
        kind: draft.kind,
        details: draft.details,
    }
}
