//! Fuzzy matching of students and offerings against a year level and section.

use crate::{
    canonical::{canonical_year_number, canonical_year_forms, contains_form},
    section_label::strip_directional_suffix,
};
use log::trace;
use models::{
    academic::{SectionOffering, Student},
    load::FacultyLoad,
};

/// Treats absent and blank targets alike
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn year_matches(candidate: &str, target: &str) -> bool {
    if contains_form(&canonical_year_forms(target), candidate) {
        return true;
    }

    // Legacy rows store partial descriptors such as "Year 4"
    canonical_year_number(target).is_some_and(|n| candidate.contains(&n.to_string()))
}

fn section_matches(candidate: &str, target: &str) -> bool {
    let candidate = strip_directional_suffix(candidate).to_lowercase();
    let target = strip_directional_suffix(target).to_lowercase();

    candidate == target || candidate.starts_with(&target)
}

/// Whether a candidate's year level and section satisfy the target.
///
/// A blank or absent target dimension matches everything.
pub fn matches(
    candidate_year: &str,
    candidate_section: &str,
    target_year: Option<&str>,
    target_section: Option<&str>,
) -> bool {
    let year_ok = non_blank(target_year).is_none_or(|target| year_matches(candidate_year, target));
    let section_ok =
        non_blank(target_section).is_none_or(|target| section_matches(candidate_section, target));

    trace!(
        "match {candidate_year:?}/{candidate_section:?} against {target_year:?}/{target_section:?}: year={year_ok} section={section_ok}"
    );

    year_ok && section_ok
}

/// A record placed in a year level and section
pub trait Placement {
    fn year_level(&self) -> &str;
    fn section(&self) -> &str;
}

impl Placement for Student {
    fn year_level(&self) -> &str {
        &self.year_level
    }

    fn section(&self) -> &str {
        &self.section
    }
}

impl Placement for SectionOffering {
    fn year_level(&self) -> &str {
        &self.year_level
    }

    fn section(&self) -> &str {
        &self.parent_section
    }
}

/// Year level and section to look for; `None` means unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTarget {
    pub year_level: Option<String>,
    pub section: Option<String>,
}

impl SectionTarget {
    pub fn new(year_level: Option<&str>, section: Option<&str>) -> Self {
        Self {
            year_level: year_level.map(str::to_owned),
            section: section.map(str::to_owned),
        }
    }

    pub fn matches(&self, record: &impl Placement) -> bool {
        matches(
            record.year_level(),
            record.section(),
            self.year_level.as_deref(),
            self.section.as_deref(),
        )
    }

    /// Matching records from a shortlist already narrowed by indexed keys
    pub fn filter<'a, T: Placement>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|record| self.matches(*record)).collect()
    }
}

/// Number of students enrolled in the section a load teaches.
///
/// `students` should already be narrowed to the offering's program; others
/// are skipped anyway. Manual loads and incomplete offerings count zero.
pub fn count_students_for_load(load: &FacultyLoad, students: &[Student]) -> usize {
    let Some(offering) = load.section_offering.as_ref() else {
        return 0;
    };

    let year_level = offering.year_level.trim();
    let section = strip_directional_suffix(&offering.parent_section);
    if year_level.is_empty() || section.is_empty() {
        return 0;
    }

    let target = SectionTarget::new(Some(year_level), Some(&section));

    students
        .iter()
        .filter(|student| student.program_id == Some(offering.program_id))
        .filter(|student| target.matches(*student))
        .count()
}
