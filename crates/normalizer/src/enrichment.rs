//! Derives the display view of a faculty load.
//!
//! Stored shadow values override the linked section offering, which overrides
//! its subject, which overrides the defaults. The schedule is the exception:
//! an offering with schedule entries always supplies the schedule.

use crate::{
    canonical::same_semester,
    precedence::{Level, Precedence, Resolved},
    schedule::{ROOM_TBA, assemble_schedule, collect_rooms},
    section_label::{format_section_label, parse_manual_section, strip_directional_suffix},
};
use log::debug;
use models::{
    academic::SectionOffering,
    load::{FacultyLoad, LoadDetails, LoadKind},
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A faculty load with every derived field resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedFacultyLoad {
    pub id: i64,
    pub faculty_id: i64,
    pub section_offering_id: Option<i64>,
    pub section_offering: Option<SectionOffering>,
    pub kind: LoadKind,
    pub subject_code: Option<String>,
    pub subject_description: Option<String>,
    pub lec_hours: u32,
    pub lab_hours: u32,
    pub units: u32,
    /// Raw section as stored or inherited
    pub section: Option<String>,
    /// Display label such as "BSIT 4A"; always derived
    pub formatted_section: String,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub schedule: String,
    pub room: String,
    /// Which precedence level supplied each field
    pub origins: BTreeMap<&'static str, Level>,
}

impl EnrichedFacultyLoad {
    /// Turns the resolved values back into a load whose shadow fields hold them
    pub fn into_load(self) -> FacultyLoad {
        FacultyLoad {
            id: self.id,
            faculty_id: self.faculty_id,
            section_offering_id: self.section_offering_id,
            section_offering: self.section_offering,
            kind: self.kind,
            details: LoadDetails {
                subject_code: self.subject_code,
                subject_description: self.subject_description,
                lec_hours: Some(self.lec_hours),
                lab_hours: Some(self.lab_hours),
                units: Some(self.units),
                section: self.section,
                schedule: Some(self.schedule),
                room: Some(self.room),
                academic_year: self.academic_year,
                semester: self.semester,
            },
        }
    }

    /// The label to show for this load's section, without directional suffix
    pub fn section_label(&self) -> Option<String> {
        [Some(self.formatted_section.as_str()), self.section.as_deref()]
            .into_iter()
            .flatten()
            .map(strip_directional_suffix)
            .find(|label| !label.is_empty())
    }

    /// Whether the resolved term matches; unset criteria are unconstrained
    pub fn in_term(&self, academic_year: Option<&str>, semester: Option<&str>) -> bool {
        let year_ok = academic_year.is_none_or(|wanted| {
            self.academic_year
                .as_deref()
                .is_some_and(|year| year.trim() == wanted.trim())
        });
        let semester_ok = semester.is_none_or(|wanted| {
            self.semester
                .as_deref()
                .is_some_and(|semester| same_semester(semester, wanted))
        });

        year_ok && semester_ok
    }
}

/// Records the winning level of each field while unwrapping values
#[derive(Default)]
struct Origins(BTreeMap<&'static str, Level>);

impl Origins {
    fn take<T>(&mut self, field: &'static str, resolved: Resolved<T>) -> T {
        self.0.insert(field, resolved.level);
        resolved.value
    }

    fn take_opt<T>(&mut self, field: &'static str, resolved: Option<Resolved<T>>) -> Option<T> {
        match resolved {
            Some(resolved) => Some(self.take(field, resolved)),
            None => {
                self.0.insert(field, Level::Default);
                None
            }
        }
    }
}

/// Resolves every derived field of a faculty load.
///
/// Never fails: each missing relation degrades to the next precedence level.
pub fn enrich(load: &FacultyLoad) -> EnrichedFacultyLoad {
    match &load.section_offering {
        Some(offering) => enrich_linked(load, offering),
        None => enrich_manual(load),
    }
}

fn enrich_linked(load: &FacultyLoad, offering: &SectionOffering) -> EnrichedFacultyLoad {
    let stored = &load.details;
    let subject = offering.subject.as_ref();
    let mut origins = Origins::default();

    let subject_code = origins.take_opt(
        "subject_code",
        Precedence::new()
            .stored(stored.subject_code.clone())
            .subject(subject.and_then(|s| s.code.clone()))
            .resolve(),
    );
    let subject_description = origins.take_opt(
        "subject_description",
        Precedence::new()
            .stored(stored.subject_description.clone())
            .subject(subject.and_then(|s| s.name.clone()))
            .resolve(),
    );
    let lec_hours = origins.take(
        "lec_hours",
        Precedence::new()
            .stored(stored.lec_hours)
            .offering(offering.lec_hours)
            .subject(subject.and_then(|s| s.lec_hours))
            .resolve_or(0),
    );
    let lab_hours = origins.take(
        "lab_hours",
        Precedence::new()
            .stored(stored.lab_hours)
            .offering(offering.lab_hours)
            .subject(subject.and_then(|s| s.lab_hours))
            .resolve_or(0),
    );
    let units = origins.take(
        "units",
        Precedence::new()
            .stored(stored.units)
            .subject(subject.and_then(|s| s.units))
            .resolve_or(0),
    );
    let section = origins.take_opt(
        "section",
        Precedence::new()
            .stored(stored.section.clone())
            .offering(Some(offering.parent_section.clone()))
            .resolve(),
    );
    let academic_year = origins.take_opt(
        "academic_year",
        Precedence::new()
            .stored(stored.academic_year.clone())
            .offering(Some(offering.academic_year.clone()))
            .resolve(),
    );
    let semester = origins.take_opt(
        "semester",
        Precedence::new()
            .stored(stored.semester.clone())
            .offering(Some(offering.semester.clone()))
            .resolve(),
    );

    // Offering schedules are authoritative whenever there are any
    let schedule = if offering.schedules.is_empty() {
        Precedence::new()
            .stored(stored.schedule.clone())
            .resolve_or(String::new())
    } else {
        Resolved {
            value: assemble_schedule(&offering.schedules),
            level: Level::Offering,
        }
    };
    let schedule = origins.take("schedule", schedule);

    let rooms = collect_rooms(&offering.schedules);
    let room = if rooms.is_empty() {
        Precedence::new()
            .stored(stored.room.clone())
            .resolve_or(ROOM_TBA.to_owned())
    } else {
        Resolved {
            value: rooms.join(", "),
            level: Level::Offering,
        }
    };
    let room = origins.take("room", room);

    let program_code = offering
        .program
        .as_ref()
        .and_then(|program| program.display_code())
        .unwrap_or_default();
    let mut formatted_section =
        format_section_label(program_code, &offering.year_level, &offering.parent_section);
    if formatted_section.is_empty() {
        formatted_section = strip_directional_suffix(section.as_deref().unwrap_or_default());
    }

    debug!(
        "Formatted section for faculty load {}: program={program_code:?} year_level={:?} section={:?} -> {formatted_section:?}",
        load.id, offering.year_level, offering.parent_section
    );

    EnrichedFacultyLoad {
        id: load.id,
        faculty_id: load.faculty_id,
        section_offering_id: Some(offering.id),
        section_offering: Some(offering.clone()),
        kind: load.kind,
        subject_code,
        subject_description,
        lec_hours,
        lab_hours,
        units,
        section,
        formatted_section,
        academic_year,
        semester,
        schedule,
        room,
        origins: origins.0,
    }
}

fn enrich_manual(load: &FacultyLoad) -> EnrichedFacultyLoad {
    let stored = &load.details;
    let mut origins = Origins::default();

    let subject_code = origins.take_opt(
        "subject_code",
        Precedence::new().stored(stored.subject_code.clone()).resolve(),
    );
    let subject_description = origins.take_opt(
        "subject_description",
        Precedence::new()
            .stored(stored.subject_description.clone())
            .resolve(),
    );
    let lec_hours = origins.take(
        "lec_hours",
        Precedence::new().stored(stored.lec_hours).resolve_or(0),
    );
    let lab_hours = origins.take(
        "lab_hours",
        Precedence::new().stored(stored.lab_hours).resolve_or(0),
    );
    let units = origins.take("units", Precedence::new().stored(stored.units).resolve_or(0));
    let section = origins.take_opt(
        "section",
        Precedence::new().stored(stored.section.clone()).resolve(),
    );
    let academic_year = origins.take_opt(
        "academic_year",
        Precedence::new().stored(stored.academic_year.clone()).resolve(),
    );
    let semester = origins.take_opt(
        "semester",
        Precedence::new().stored(stored.semester.clone()).resolve(),
    );
    let schedule = origins.take(
        "schedule",
        Precedence::new()
            .stored(stored.schedule.clone())
            .resolve_or(String::new()),
    );
    let room = origins.take(
        "room",
        Precedence::new()
            .stored(stored.room.clone())
            .resolve_or(ROOM_TBA.to_owned()),
    );

    let formatted_section = section
        .as_deref()
        .map(parse_manual_section)
        .unwrap_or_default();

    EnrichedFacultyLoad {
        id: load.id,
        faculty_id: load.faculty_id,
        section_offering_id: load.section_offering_id,
        section_offering: None,
        kind: load.kind,
        subject_code,
        subject_description,
        lec_hours,
        lab_hours,
        units,
        section,
        formatted_section,
        academic_year,
        semester,
        schedule,
        room,
        origins: origins.0,
    }
}

/// Unique, sorted section labels across a faculty member's enriched loads
pub fn distinct_section_labels(loads: &[EnrichedFacultyLoad]) -> Vec<String> {
    loads
        .iter()
        .filter_map(EnrichedFacultyLoad::section_label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{
        academic::{Program, Subject},
        schedule::ScheduleEntry,
    };

    fn offering(schedules: Vec<ScheduleEntry>) -> SectionOffering {
        SectionOffering {
            id: 10,
            program_id: 1,
            subject_id: 5,
            program: Some(Program {
                id: 1,
                code: Some("bsit".to_owned()),
                name: Some("Information Technology".to_owned()),
            }),
            subject: Some(Subject {
                id: 5,
                code: Some("IT401".to_owned()),
                name: Some("Capstone Project".to_owned()),
                lec_hours: Some(3),
                lab_hours: Some(2),
                units: Some(4),
            }),
            academic_year: "2024-2025".to_owned(),
            semester: "First".to_owned(),
            year_level: "Fourth Year".to_owned(),
            parent_section: "A-West".to_owned(),
            lec_hours: None,
            lab_hours: Some(1),
            slots: Some(40),
            schedules,
        }
    }

    fn linked_load(offering: SectionOffering, details: LoadDetails) -> FacultyLoad {
        FacultyLoad {
            id: 100,
            faculty_id: 42,
            section_offering_id: Some(offering.id),
            section_offering: Some(offering),
            kind: LoadKind::FullTime,
            details,
        }
    }

    fn manual_load(details: LoadDetails) -> FacultyLoad {
        FacultyLoad {
            id: 200,
            faculty_id: 42,
            section_offering_id: None,
            section_offering: None,
            kind: LoadKind::PartTime,
            details,
        }
    }

    fn mwf() -> Vec<ScheduleEntry> {
        vec![
            ScheduleEntry::parse("mon", "08:00", "09:30", Some("301")).unwrap(),
            ScheduleEntry::parse("wed", "08:00", "09:30", Some("301")).unwrap(),
            ScheduleEntry::parse("fri", "13:00", "15:00", Some("Lab 2")).unwrap(),
        ]
    }

    #[test]
    fn test_linked_load_derives_from_offering() {
        let enriched = enrich(&linked_load(offering(mwf()), LoadDetails::default()));

        assert_eq!(enriched.subject_code.as_deref(), Some("IT401"));
        assert_eq!(enriched.subject_description.as_deref(), Some("Capstone Project"));
        assert_eq!(enriched.lec_hours, 3);
        assert_eq!(enriched.lab_hours, 1);
        assert_eq!(enriched.units, 4);
        assert_eq!(enriched.section.as_deref(), Some("A-West"));
        assert_eq!(enriched.formatted_section, "BSIT 4A");
        assert_eq!(enriched.academic_year.as_deref(), Some("2024-2025"));
        assert_eq!(enriched.semester.as_deref(), Some("First"));
        assert_eq!(
            enriched.schedule,
            "MON 8:00 AM-9:30 AM (301), WED 8:00 AM-9:30 AM (301), FRI 1:00 PM-3:00 PM (Lab 2)"
        );
        assert_eq!(enriched.room, "301, Lab 2");

        assert_eq!(enriched.origins["lec_hours"], Level::Subject);
        assert_eq!(enriched.origins["lab_hours"], Level::Offering);
        assert_eq!(enriched.origins["schedule"], Level::Offering);
    }

    #[test]
    fn test_stored_values_override_offering() {
        let details = LoadDetails {
            subject_code: Some("IT401-L".to_owned()),
            lec_hours: Some(0),
            units: Some(3),
            section: Some("B".to_owned()),
            semester: Some("1st Semester".to_owned()),
            ..Default::default()
        };
        let enriched = enrich(&linked_load(offering(mwf()), details));

        assert_eq!(enriched.subject_code.as_deref(), Some("IT401-L"));
        assert_eq!(enriched.lec_hours, 0);
        assert_eq!(enriched.units, 3);
        assert_eq!(enriched.section.as_deref(), Some("B"));
        assert_eq!(enriched.semester.as_deref(), Some("1st Semester"));
        assert_eq!(enriched.origins["subject_code"], Level::Stored);
        assert_eq!(enriched.origins["lec_hours"], Level::Stored);
        // The label always follows the offering
        assert_eq!(enriched.formatted_section, "BSIT 4A");
    }

    #[test]
    fn test_offering_schedule_beats_stored_schedule() {
        let details = LoadDetails {
            schedule: Some("TTH 10:00-11:30".to_owned()),
            ..Default::default()
        };
        let enriched = enrich(&linked_load(offering(mwf()), details));

        assert!(enriched.schedule.starts_with("MON 8:00 AM-9:30 AM"));
        assert_eq!(enriched.origins["schedule"], Level::Offering);
    }

    #[test]
    fn test_stored_schedule_used_when_offering_has_none() {
        let details = LoadDetails {
            schedule: Some("TBA-manual".to_owned()),
            ..Default::default()
        };
        let enriched = enrich(&linked_load(offering(vec![]), details));

        assert_eq!(enriched.schedule, "TBA-manual");
        assert_eq!(enriched.origins["schedule"], Level::Stored);
        assert_eq!(enriched.room, "TBA");
    }

    #[test]
    fn test_room_falls_back_to_stored_then_tba() {
        let no_rooms = vec![ScheduleEntry::parse("mon", "08:00", "09:00", None).unwrap()];

        let details = LoadDetails {
            room: Some("Gym".to_owned()),
            ..Default::default()
        };
        let enriched = enrich(&linked_load(offering(no_rooms.clone()), details));
        assert_eq!(enriched.room, "Gym");

        let enriched = enrich(&linked_load(offering(no_rooms), LoadDetails::default()));
        assert_eq!(enriched.room, "TBA");
        assert_eq!(enriched.origins["room"], Level::Default);
    }

    #[test]
    fn test_label_without_program_or_year() {
        let mut offering = offering(vec![]);
        offering.program = None;
        let enriched = enrich(&linked_load(offering.clone(), LoadDetails::default()));
        assert_eq!(enriched.formatted_section, "A");

        offering.program = Some(Program {
            id: 1,
            code: None,
            name: Some("BSCS".to_owned()),
        });
        offering.year_level = String::new();
        let enriched = enrich(&linked_load(offering.clone(), LoadDetails::default()));
        assert_eq!(enriched.formatted_section, "BSCS A");

        offering.parent_section = String::new();
        let details = LoadDetails {
            section: Some("C - North".to_owned()),
            ..Default::default()
        };
        let enriched = enrich(&linked_load(offering, details));
        assert_eq!(enriched.formatted_section, "C");
    }

    #[test]
    fn test_missing_subject_degrades_to_defaults() {
        let mut offering = offering(vec![]);
        offering.subject = None;
        offering.lab_hours = None;
        let enriched = enrich(&linked_load(offering, LoadDetails::default()));

        assert_eq!(enriched.subject_code, None);
        assert_eq!(enriched.lec_hours, 0);
        assert_eq!(enriched.lab_hours, 0);
        assert_eq!(enriched.units, 0);
        assert_eq!(enriched.origins["subject_code"], Level::Default);
    }

    #[test]
    fn test_manual_load_uses_stored_values() {
        let details = LoadDetails {
            subject_code: Some("GE101".to_owned()),
            subject_description: Some("Purposive Communication".to_owned()),
            units: Some(3),
            section: Some("BSIT-4A-West".to_owned()),
            schedule: Some("SAT 8:00 AM-11:00 AM".to_owned()),
            academic_year: Some("2024-2025".to_owned()),
            semester: Some("Second".to_owned()),
            ..Default::default()
        };
        let enriched = enrich(&manual_load(details));

        assert_eq!(enriched.subject_code.as_deref(), Some("GE101"));
        assert_eq!(enriched.lec_hours, 0);
        assert_eq!(enriched.units, 3);
        assert_eq!(enriched.formatted_section, "BSIT 4A");
        assert_eq!(enriched.schedule, "SAT 8:00 AM-11:00 AM");
        assert_eq!(enriched.room, "TBA");
        assert_eq!(enriched.section_offering, None);
    }

    #[test]
    fn test_manual_load_without_section() {
        let enriched = enrich(&manual_load(LoadDetails::default()));
        assert_eq!(enriched.formatted_section, "");
        assert_eq!(enriched.schedule, "");
        assert_eq!(enriched.section_label(), None);
    }

    fn derived(enriched: &EnrichedFacultyLoad) -> EnrichedFacultyLoad {
        EnrichedFacultyLoad {
            origins: BTreeMap::new(),
            ..enriched.clone()
        }
    }

    #[test]
    fn test_enrichment_is_idempotent() {
        let loads = vec![
            linked_load(offering(mwf()), LoadDetails::default()),
            linked_load(
                offering(vec![]),
                LoadDetails {
                    schedule: Some("TBA-manual".to_owned()),
                    lec_hours: Some(5),
                    ..Default::default()
                },
            ),
            manual_load(LoadDetails {
                subject_code: Some("GE101".to_owned()),
                section: Some("4A".to_owned()),
                ..Default::default()
            }),
        ];

        for load in loads {
            let once = enrich(&load);
            let twice = enrich(&once.clone().into_load());
            assert_eq!(derived(&once), derived(&twice));
        }
    }

    #[test]
    fn test_distinct_section_labels() {
        let loads = vec![
            enrich(&linked_load(offering(mwf()), LoadDetails::default())),
            enrich(&linked_load(offering(vec![]), LoadDetails::default())),
            enrich(&manual_load(LoadDetails {
                section: Some("BSIT-2B".to_owned()),
                ..Default::default()
            })),
            enrich(&manual_load(LoadDetails::default())),
        ];

        assert_eq!(distinct_section_labels(&loads), vec!["BSIT 2B", "BSIT 4A"]);
    }

    #[test]
    fn test_in_term_uses_resolved_values() {
        let linked = enrich(&linked_load(offering(vec![]), LoadDetails::default()));
        assert!(linked.in_term(Some("2024-2025"), Some("1st Semester")));
        assert!(linked.in_term(None, Some("1")));
        assert!(!linked.in_term(Some("2025-2026"), None));
        assert!(!linked.in_term(None, Some("Summer")));

        let undated = enrich(&manual_load(LoadDetails::default()));
        assert!(undated.in_term(None, None));
        assert!(!undated.in_term(None, Some("First")));
    }
}
