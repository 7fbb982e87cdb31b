use log::debug;
use models::{
    academic::SectionOffering,
    schedule::{ScheduleEntry, ScheduleError},
};

/// Placeholder shown when no room is known
pub const ROOM_TBA: &str = "TBA";

/// Joins all entries, in order, into one schedule line such as
/// "MON 8:00 AM-9:30 AM (301), WED 8:00 AM-9:30 AM (301)".
///
/// Returns an empty string for an empty schedule.
pub fn assemble_schedule(entries: &[ScheduleEntry]) -> String {
    entries
        .iter()
        .map(ScheduleEntry::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct non-blank rooms across the entries, in first-seen order
pub fn collect_rooms(entries: &[ScheduleEntry]) -> Vec<String> {
    let mut rooms: Vec<String> = Vec::new();

    for room in entries.iter().filter_map(ScheduleEntry::room) {
        if !rooms.iter().any(|seen| seen == room) {
            rooms.push(room.to_owned());
        }
    }

    rooms
}

/// Rooms joined for display, or "TBA" when none of the entries has one
pub fn display_rooms(entries: &[ScheduleEntry]) -> String {
    let rooms = collect_rooms(entries);

    if rooms.is_empty() {
        ROOM_TBA.to_owned()
    } else {
        rooms.join(", ")
    }
}

/// A schedule entry as submitted, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}

/// Replaces an offering's whole schedule.
///
/// Every draft is validated first; on any error the offering is left untouched.
pub fn replace_schedule(
    offering: &mut SectionOffering,
    drafts: &[ScheduleDraft],
) -> Result<(), ScheduleError> {
    let entries = drafts
        .iter()
        .map(|draft| {
            ScheduleEntry::parse(
                &draft.day,
                &draft.start_time,
                &draft.end_time,
                draft.room.as_deref(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Replacing {} schedule entries of offering {} with {}",
        offering.schedules.len(),
        offering.id,
        entries.len()
    );
    offering.schedules = entries;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, start: &str, end: &str, room: Option<&str>) -> ScheduleEntry {
        ScheduleEntry::parse(day, start, end, room).unwrap()
    }

    fn draft(day: &str, start: &str, end: &str, room: Option<&str>) -> ScheduleDraft {
        ScheduleDraft {
            day: day.to_owned(),
            start_time: start.to_owned(),
            end_time: end.to_owned(),
            room: room.map(str::to_owned),
        }
    }

    fn offering() -> SectionOffering {
        SectionOffering {
            id: 7,
            program_id: 1,
            subject_id: 2,
            program: None,
            subject: None,
            academic_year: "2024-2025".to_owned(),
            semester: "First".to_owned(),
            year_level: "4".to_owned(),
            parent_section: "A".to_owned(),
            lec_hours: None,
            lab_hours: None,
            slots: Some(40),
            schedules: vec![entry("fri", "10:00", "11:00", None)],
        }
    }

    #[test]
    fn test_assemble_schedule() {
        let entries = vec![
            entry("mon", "08:00", "09:30", Some("301")),
            entry("wed", "08:00", "09:30", Some("301")),
        ];

        assert_eq!(
            assemble_schedule(&entries),
            "MON 8:00 AM-9:30 AM (301), WED 8:00 AM-9:30 AM (301)"
        );
    }

    #[test]
    fn test_assemble_keeps_input_order_and_omits_missing_room() {
        let entries = vec![
            entry("thu", "13:00", "16:00", None),
            entry("tue", "07:30", "09:00", Some("Lab 2")),
        ];

        assert_eq!(
            assemble_schedule(&entries),
            "THU 1:00 PM-4:00 PM, TUE 7:30 AM-9:00 AM (Lab 2)"
        );
    }

    #[test]
    fn test_empty_schedule() {
        assert_eq!(assemble_schedule(&[]), "");
        assert!(collect_rooms(&[]).is_empty());
        assert_eq!(display_rooms(&[]), ROOM_TBA);
    }

    #[test]
    fn test_collect_rooms_distinct() {
        let entries = vec![
            entry("mon", "08:00", "09:00", Some("301")),
            entry("tue", "08:00", "09:00", None),
            entry("wed", "08:00", "09:00", Some("Lab 1")),
            entry("fri", "08:00", "09:00", Some("301")),
        ];

        assert_eq!(collect_rooms(&entries), vec!["301", "Lab 1"]);
        assert_eq!(display_rooms(&entries), "301, Lab 1");
    }

    #[test]
    fn test_display_rooms_without_any_room() {
        let entries = vec![entry("mon", "08:00", "09:00", None)];
        assert_eq!(display_rooms(&entries), "TBA");
    }

    #[test]
    fn test_replace_schedule() {
        let mut offering = offering();

        replace_schedule(
            &mut offering,
            &[
                draft("Mon", "08:00", "09:30", Some("301")),
                draft("Wed", "08:00", "09:30", None),
            ],
        )
        .unwrap();

        assert_eq!(offering.schedules.len(), 2);
        assert_eq!(offering.schedules[0].day, "Mon");
        assert_eq!(offering.schedules[1].room, None);
    }

    #[test]
    fn test_replace_schedule_is_all_or_nothing() {
        let mut offering = offering();
        let before = offering.schedules.clone();

        let result = replace_schedule(
            &mut offering,
            &[
                draft("Mon", "08:00", "09:30", None),
                draft("Wed", "10:00", "09:00", None),
            ],
        );

        assert!(matches!(
            result,
            Err(ScheduleError::EndNotAfterStart { .. })
        ));
        assert_eq!(offering.schedules, before);
    }

    #[test]
    fn test_replace_schedule_with_nothing_clears() {
        let mut offering = offering();
        replace_schedule(&mut offering, &[]).unwrap();
        assert!(offering.schedules.is_empty());
    }
}
