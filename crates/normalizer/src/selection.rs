//! Offering uniqueness and list filtering.
//!
//! Callers narrow candidates by the ids the store indexes (program, subject);
//! descriptor comparison then happens in memory over that shortlist.

use crate::{
    canonical::{same_semester, same_year_level},
    enrichment::enrich,
    error::OfferingError,
    matcher::SectionTarget,
};
use log::debug;
use models::{academic::SectionOffering, load::FacultyLoad};

/// Fields that identify a section offering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferingKey<'a> {
    pub program_id: i64,
    pub subject_id: i64,
    pub academic_year: &'a str,
    pub semester: &'a str,
    pub year_level: &'a str,
    pub parent_section: &'a str,
}

impl<'a> OfferingKey<'a> {
    pub fn of(offering: &'a SectionOffering) -> Self {
        Self {
            program_id: offering.program_id,
            subject_id: offering.subject_id,
            academic_year: offering.academic_year.trim(),
            semester: offering.semester.trim(),
            year_level: offering.year_level.trim(),
            parent_section: offering.parent_section.trim(),
        }
    }

    /// Equality up to descriptor format ("4" and "Fourth Year" are one year level).
    ///
    /// Directional suffixes are significant here: "A-West" and "A-East" are
    /// distinct sections.
    pub fn same_as(&self, other: &OfferingKey<'_>) -> bool {
        self.program_id == other.program_id
            && self.subject_id == other.subject_id
            && self.academic_year == other.academic_year
            && same_semester(self.semester, other.semester)
            && same_year_level(self.year_level, other.year_level)
            && self.parent_section.eq_ignore_ascii_case(other.parent_section)
    }
}

/// Rejects an offering whose key is already taken by another offering
pub fn ensure_unique_offering(
    candidate: &SectionOffering,
    existing: &[SectionOffering],
) -> Result<(), OfferingError> {
    let key = OfferingKey::of(candidate);

    match existing
        .iter()
        .filter(|offering| offering.id != candidate.id)
        .find(|offering| key.same_as(&OfferingKey::of(offering)))
    {
        Some(offering) => Err(OfferingError::DuplicateOffering {
            existing_id: offering.id,
        }),
        None => Ok(()),
    }
}

/// Criteria for listing offerings; unset fields are unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferingFilter {
    pub program_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub year_level: Option<String>,
    pub section: Option<String>,
    /// Drop offerings that a faculty load in the same term already covers
    pub exclude_assigned: bool,
}

impl OfferingFilter {
    fn term_matches(&self, academic_year: Option<&str>, semester: Option<&str>) -> bool {
        let year_ok = self.academic_year.as_deref().is_none_or(|wanted| {
            academic_year.is_some_and(|year| year.trim() == wanted.trim())
        });
        let semester_ok = self
            .semester
            .as_deref()
            .is_none_or(|wanted| semester.is_some_and(|semester| same_semester(semester, wanted)));

        year_ok && semester_ok
    }

    fn is_assigned(&self, offering: &SectionOffering, loads: &[FacultyLoad]) -> bool {
        loads
            .iter()
            .filter(|load| load.section_offering_id == Some(offering.id))
            .any(|load| {
                enrich(load).in_term(self.academic_year.as_deref(), self.semester.as_deref())
            })
    }

    /// Offerings satisfying every criterion, in input order.
    ///
    /// `loads` is only consulted when `exclude_assigned` is set.
    pub fn apply<'a>(
        &self,
        offerings: &'a [SectionOffering],
        loads: &[FacultyLoad],
    ) -> Vec<&'a SectionOffering> {
        let target = SectionTarget::new(self.year_level.as_deref(), self.section.as_deref());

        let selected: Vec<_> = offerings
            .iter()
            .filter(|o| self.program_id.is_none_or(|id| o.program_id == id))
            .filter(|o| self.subject_id.is_none_or(|id| o.subject_id == id))
            .filter(|o| {
                self.term_matches(Some(o.academic_year.as_str()), Some(o.semester.as_str()))
            })
            .filter(|o| target.matches(*o))
            .filter(|o| !(self.exclude_assigned && self.is_assigned(o, loads)))
            .collect();

        debug!(
            "Offering filter kept {} of {} offerings",
            selected.len(),
            offerings.len()
        );

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::load::{LoadDetails, LoadKind};

    fn offering(id: i64, semester: &str, year_level: &str, section: &str) -> SectionOffering {
        SectionOffering {
            id,
            program_id: 1,
            subject_id: 5,
            program: None,
            subject: None,
            academic_year: "2024-2025".to_owned(),
            semester: semester.to_owned(),
            year_level: year_level.to_owned(),
            parent_section: section.to_owned(),
            lec_hours: None,
            lab_hours: None,
            slots: None,
            schedules: vec![],
        }
    }

    fn load_for(offering: &SectionOffering) -> FacultyLoad {
        FacultyLoad {
            id: 900 + offering.id,
            faculty_id: 42,
            section_offering_id: Some(offering.id),
            section_offering: Some(offering.clone()),
            kind: LoadKind::FullTime,
            details: LoadDetails::default(),
        }
    }

    #[test]
    fn test_duplicate_offering_across_formats() {
        let existing = vec![offering(1, "First", "4", "A")];

        let candidate = offering(2, "1st Semester", "Fourth Year", "a");
        assert_eq!(
            ensure_unique_offering(&candidate, &existing),
            Err(OfferingError::DuplicateOffering { existing_id: 1 })
        );

        let other_section = offering(3, "First", "4", "B");
        assert_eq!(ensure_unique_offering(&other_section, &existing), Ok(()));

        let other_campus = offering(4, "First", "4", "A-West");
        assert_eq!(ensure_unique_offering(&other_campus, &existing), Ok(()));

        let mut other_subject = offering(5, "First", "4", "A");
        other_subject.subject_id = 6;
        assert_eq!(ensure_unique_offering(&other_subject, &existing), Ok(()));
    }

    #[test]
    fn test_offering_does_not_conflict_with_itself() {
        let existing = vec![offering(1, "First", "4", "A")];
        assert_eq!(ensure_unique_offering(&existing[0], &existing), Ok(()));
    }

    #[test]
    fn test_filter_by_descriptors() {
        let offerings = vec![
            offering(1, "First", "4", "A-West"),
            offering(2, "Second", "4", "A"),
            offering(3, "First", "3", "A"),
            offering(4, "1st Semester", "Fourth Year", "B"),
        ];

        let filter = OfferingFilter {
            semester: Some("1".to_owned()),
            year_level: Some("4th Year".to_owned()),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&offerings, &[]).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 4]);

        let filter = OfferingFilter {
            section: Some("A".to_owned()),
            program_id: Some(1),
            ..Default::default()
        };
        assert_eq!(filter.apply(&offerings, &[]).len(), 3);

        let filter = OfferingFilter {
            program_id: Some(2),
            ..Default::default()
        };
        assert!(filter.apply(&offerings, &[]).is_empty());
    }

    #[test]
    fn test_exclude_assigned() {
        let offerings = vec![
            offering(1, "First", "4", "A"),
            offering(2, "First", "4", "B"),
        ];
        let loads = vec![load_for(&offerings[0])];

        let filter = OfferingFilter {
            semester: Some("First".to_owned()),
            exclude_assigned: true,
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&offerings, &loads).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2]);

        let keep_all = OfferingFilter::default();
        assert_eq!(keep_all.apply(&offerings, &loads).len(), 2);
    }
}
