use crate::entities::{faculty_load, program, section_offering, section_offering_schedule, subject};
use models::{
    academic::{Program, SectionOffering, Subject},
    load::FacultyLoad,
    schedule::ScheduleEntry,
};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::{BTreeSet, HashMap};

pub struct Preload;

impl Preload {
    /// Attaches programs, subjects and schedules to offering rows.
    ///
    /// Runs at most three queries regardless of how many rows are passed.
    pub async fn offerings<C: ConnectionTrait>(
        db: &C,
        rows: Vec<section_offering::Model>,
    ) -> Result<Vec<SectionOffering>, DbErr> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let offering_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let program_ids: BTreeSet<i64> = rows.iter().map(|row| row.program_id).collect();
        let subject_ids: BTreeSet<i64> = rows.iter().map(|row| row.subject_id).collect();

        let (schedules, programs, subjects) = futures::try_join!(
            section_offering_schedule::Entity::find()
                .filter(section_offering_schedule::Column::SectionOfferingId.is_in(offering_ids))
                .order_by_asc(section_offering_schedule::Column::Id)
                .all(db),
            program::Entity::find()
                .filter(program::Column::Id.is_in(program_ids))
                .all(db),
            subject::Entity::find()
                .filter(subject::Column::Id.is_in(subject_ids))
                .all(db),
        )?;

        let mut schedules_by_offering: HashMap<i64, Vec<ScheduleEntry>> = HashMap::new();
        for schedule in schedules {
            schedules_by_offering
                .entry(schedule.section_offering_id)
                .or_default()
                .push(ScheduleEntry::from(schedule));
        }

        let programs: HashMap<i64, Program> = programs
            .into_iter()
            .map(|row| (row.id, Program::from(row)))
            .collect();
        let subjects: HashMap<i64, Subject> = subjects
            .into_iter()
            .map(|row| (row.id, Subject::from(row)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let program = programs.get(&row.program_id).cloned();
                let subject = subjects.get(&row.subject_id).cloned();
                let schedules = schedules_by_offering.remove(&row.id).unwrap_or_default();
                row.into_offering(program, subject, schedules)
            })
            .collect())
    }

    /// Attaches the linked section offering (with its associations) to load rows
    pub async fn loads<C: ConnectionTrait>(
        db: &C,
        rows: Vec<faculty_load::Model>,
    ) -> Result<Vec<FacultyLoad>, DbErr> {
        let offering_ids: BTreeSet<i64> =
            rows.iter().filter_map(|row| row.section_offering_id).collect();

        let offerings: HashMap<i64, SectionOffering> = if offering_ids.is_empty() {
            HashMap::new()
        } else {
            let offering_rows = section_offering::Entity::find()
                .filter(section_offering::Column::Id.is_in(offering_ids))
                .all(db)
                .await?;

            Self::offerings(db, offering_rows)
                .await?
                .into_iter()
                .map(|offering| (offering.id, offering))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|row| {
                let offering = row
                    .section_offering_id
                    .and_then(|id| offerings.get(&id).cloned());
                row.into_load(offering)
            })
            .collect())
    }
}
