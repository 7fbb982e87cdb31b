use crate::{
    entities::{faculty_load, section_offering, section_offering_schedule},
    error::ServiceError,
    services::preload::Preload,
};
use chrono::{NaiveDateTime, Utc};
use log::info;
use models::{
    academic::{OfferingPatch, SectionOffering},
    schedule::ScheduleEntry,
};
use normalizer::{
    assignment::relink,
    schedule::{ScheduleDraft, replace_schedule},
    selection::{OfferingFilter, ensure_unique_offering},
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

pub struct SectionOfferingService;

impl SectionOfferingService {
    pub async fn get_offering(
        db: &DatabaseConnection,
        offering_id: i64,
    ) -> Result<SectionOffering, ServiceError> {
        let not_found = ServiceError::NotFound {
            entity: "section offering",
            id: offering_id,
        };

        let Some(row) = section_offering::Entity::find_by_id(offering_id)
            .one(db)
            .await?
        else {
            return Err(not_found);
        };

        Preload::offerings(db, vec![row])
            .await?
            .pop()
            .ok_or(not_found)
    }

    /// Offerings matching a filter.
    ///
    /// Program and subject ids narrow the query; descriptor criteria are
    /// compared in memory since stored formats vary.
    pub async fn list(
        db: &DatabaseConnection,
        filter: &OfferingFilter,
    ) -> Result<Vec<SectionOffering>, ServiceError> {
        let mut condition = Condition::all();
        if let Some(program_id) = filter.program_id {
            condition = condition.add(section_offering::Column::ProgramId.eq(program_id));
        }
        if let Some(subject_id) = filter.subject_id {
            condition = condition.add(section_offering::Column::SubjectId.eq(subject_id));
        }

        let rows = section_offering::Entity::find()
            .filter(condition)
            .order_by_asc(section_offering::Column::Id)
            .all(db)
            .await?;
        let offerings = Preload::offerings(db, rows).await?;

        let loads = if filter.exclude_assigned && !offerings.is_empty() {
            let load_rows = faculty_load::Entity::find()
                .filter(
                    faculty_load::Column::SectionOfferingId
                        .is_in(offerings.iter().map(|offering| offering.id)),
                )
                .all(db)
                .await?;
            Preload::loads(db, load_rows).await?
        } else {
            vec![]
        };

        Ok(filter
            .apply(&offerings, &loads)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Stores a new offering together with its schedule.
    ///
    /// Fails without writing when the schedule is invalid or another offering
    /// already covers the same subject, term and section. The id of
    /// `offering` is ignored; the stored record is returned.
    pub async fn create(
        db: &DatabaseConnection,
        mut offering: SectionOffering,
        schedules: &[ScheduleDraft],
    ) -> Result<SectionOffering, ServiceError> {
        replace_schedule(&mut offering, schedules)?;
        Self::ensure_unique(db, &offering).await?;

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;

        let row = section_offering::new_active_model(&offering, now)
            .insert(&txn)
            .await?;
        Self::insert_schedules(&txn, row.id, &offering.schedules, now).await?;

        txn.commit().await?;

        info!(
            "Created section offering {} with {} schedule entries",
            row.id,
            offering.schedules.len()
        );
        Self::get_offering(db, row.id).await
    }

    /// Applies a partial update to an offering.
    ///
    /// When `schedules` is given the schedule is replaced in the same
    /// transaction. The updated offering must still be unique among the
    /// offerings of its program and subject.
    pub async fn update(
        db: &DatabaseConnection,
        offering_id: i64,
        patch: OfferingPatch,
        schedules: Option<&[ScheduleDraft]>,
    ) -> Result<SectionOffering, ServiceError> {
        let mut offering = Self::get_offering(db, offering_id).await?;
        offering.apply(patch);
        if let Some(drafts) = schedules {
            replace_schedule(&mut offering, drafts)?;
        }
        Self::ensure_unique(db, &offering).await?;

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;

        let mut active = section_offering::new_active_model(&offering, now);
        active.created_at = NotSet;
        section_offering::Entity::update_many()
            .set(active)
            .filter(section_offering::Column::Id.eq(offering_id))
            .exec(&txn)
            .await?;

        if schedules.is_some() {
            section_offering_schedule::Entity::delete_many()
                .filter(section_offering_schedule::Column::SectionOfferingId.eq(offering_id))
                .exec(&txn)
                .await?;
            Self::insert_schedules(&txn, offering_id, &offering.schedules, now).await?;
        }

        txn.commit().await?;

        info!("Updated section offering {offering_id}");
        Self::get_offering(db, offering_id).await
    }

    /// Deletes an offering and its schedule.
    ///
    /// Loads linked to it become manual loads that keep the subject, section,
    /// schedule and term they showed before the delete.
    pub async fn delete(db: &DatabaseConnection, offering_id: i64) -> Result<(), ServiceError> {
        if section_offering::Entity::find_by_id(offering_id)
            .one(db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound {
                entity: "section offering",
                id: offering_id,
            });
        }

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;

        let load_rows = faculty_load::Entity::find()
            .filter(faculty_load::Column::SectionOfferingId.eq(offering_id))
            .all(&txn)
            .await?;
        let loads = Preload::loads(&txn, load_rows).await?;
        let unlinked = loads.len();

        for load in loads {
            let manual = relink(load, None);
            let mut active = faculty_load::ActiveModel {
                section_offering_id: Set(None),
                subject_id: Set(None),
                updated_at: Set(Some(now)),
                ..Default::default()
            };
            faculty_load::set_details(&mut active, &manual.details);

            faculty_load::Entity::update_many()
                .set(active)
                .filter(faculty_load::Column::Id.eq(manual.id))
                .exec(&txn)
                .await?;
        }

        section_offering_schedule::Entity::delete_many()
            .filter(section_offering_schedule::Column::SectionOfferingId.eq(offering_id))
            .exec(&txn)
            .await?;
        section_offering::Entity::delete_by_id(offering_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!("Deleted section offering {offering_id}, {unlinked} loads made manual");
        Ok(())
    }

    /// Replaces every schedule entry of an offering.
    ///
    /// All entries are validated before the transaction starts, so either the
    /// full new schedule is stored or the old one is kept.
    pub async fn replace_schedules(
        db: &DatabaseConnection,
        offering_id: i64,
        drafts: &[ScheduleDraft],
    ) -> Result<SectionOffering, ServiceError> {
        let mut offering = Self::get_offering(db, offering_id).await?;
        replace_schedule(&mut offering, drafts)?;

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;

        section_offering_schedule::Entity::delete_many()
            .filter(section_offering_schedule::Column::SectionOfferingId.eq(offering_id))
            .exec(&txn)
            .await?;
        Self::insert_schedules(&txn, offering_id, &offering.schedules, now).await?;

        section_offering::Entity::update_many()
            .set(section_offering::ActiveModel {
                updated_at: Set(Some(now)),
                ..Default::default()
            })
            .filter(section_offering::Column::Id.eq(offering_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(
            "Replaced schedule of section offering {offering_id} with {} entries",
            offering.schedules.len()
        );
        Ok(offering)
    }

    /// Fails when another offering of the same program and subject covers the
    /// same term, year level and section
    async fn ensure_unique(
        db: &DatabaseConnection,
        offering: &SectionOffering,
    ) -> Result<(), ServiceError> {
        let siblings: Vec<SectionOffering> = section_offering::Entity::find()
            .filter(section_offering::Column::ProgramId.eq(offering.program_id))
            .filter(section_offering::Column::SubjectId.eq(offering.subject_id))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.into_offering(None, None, vec![]))
            .collect();

        Ok(ensure_unique_offering(offering, &siblings)?)
    }

    async fn insert_schedules<C: ConnectionTrait>(
        db: &C,
        offering_id: i64,
        entries: &[ScheduleEntry],
        now: NaiveDateTime,
    ) -> Result<(), DbErr> {
        if entries.is_empty() {
            return Ok(());
        }

        let rows = entries
            .iter()
            .map(|entry| section_offering_schedule::ActiveModel {
                section_offering_id: Set(offering_id),
                day: Set(entry.day.clone()),
                start_time: Set(entry.start),
                end_time: Set(entry.end),
                room: Set(entry.room.clone()),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
                ..Default::default()
            });

        section_offering_schedule::Entity::insert_many(rows)
            .exec_without_returning(db)
            .await?;
        Ok(())
    }
}
