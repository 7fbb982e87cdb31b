use crate::{
    entities::{faculty_load, student, year_section},
    error::ServiceError,
    services::{SectionOfferingService, preload::Preload},
};
use chrono::Utc;
use log::info;
use models::{
    academic::Student,
    load::{FacultyLoad, LoadDetails, LoadKind, NewFacultyLoad},
};
use normalizer::{
    assignment::{into_load, relink, validate_new_load, validate_update},
    enrichment::{EnrichedFacultyLoad, distinct_section_labels, enrich},
    matcher::count_students_for_load,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// What an update does with the load's section offering link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OfferingLink {
    #[default]
    Keep,
    Link(i64),
    Unlink,
}

/// An enriched load with the size of the section it teaches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    #[serde(flatten)]
    pub load: EnrichedFacultyLoad,
    pub student_count: usize,
}

pub struct FacultyLoadService;

impl FacultyLoadService {
    /// All loads of a faculty member, with linked offerings preloaded
    pub async fn get_loads(
        db: &DatabaseConnection,
        faculty_id: i64,
    ) -> Result<Vec<FacultyLoad>, ServiceError> {
        let rows = faculty_load::Entity::find()
            .filter(faculty_load::Column::FacultyId.eq(faculty_id))
            .order_by_asc(faculty_load::Column::Id)
            .all(db)
            .await?;

        Ok(Preload::loads(db, rows).await?)
    }

    async fn get_load(db: &DatabaseConnection, load_id: i64) -> Result<FacultyLoad, ServiceError> {
        let row = faculty_load::Entity::find_by_id(load_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound {
                entity: "faculty load",
                id: load_id,
            })?;

        let mut loads = Preload::loads(db, vec![row]).await?;
        loads.pop().ok_or(ServiceError::NotFound {
            entity: "faculty load",
            id: load_id,
        })
    }

    /// Loads in the given term, optionally of one faculty member, paired with
    /// their enriched view.
    ///
    /// The term is matched against resolved values, so a linked load without
    /// stored term fields is found through its offering.
    async fn get_in_term(
        db: &DatabaseConnection,
        faculty_id: Option<i64>,
        academic_year: Option<&str>,
        semester: Option<&str>,
    ) -> Result<Vec<(FacultyLoad, EnrichedFacultyLoad)>, ServiceError> {
        let mut condition = Condition::all();
        if let Some(faculty_id) = faculty_id {
            condition = condition.add(faculty_load::Column::FacultyId.eq(faculty_id));
        }

        let rows = faculty_load::Entity::find()
            .filter(condition)
            .order_by_asc(faculty_load::Column::Id)
            .all(db)
            .await?;
        let total = rows.len();

        let in_term: Vec<_> = Preload::loads(db, rows)
            .await?
            .into_iter()
            .map(|load| {
                let enriched = enrich(&load);
                (load, enriched)
            })
            .filter(|(_, enriched)| enriched.in_term(academic_year, semester))
            .collect();

        info!(
            "{} of {total} loads in term {:?} {:?} (faculty {:?})",
            in_term.len(),
            academic_year,
            semester,
            faculty_id
        );

        Ok(in_term)
    }

    /// Enriched loads of a faculty member in the given term
    pub async fn get_enriched_loads(
        db: &DatabaseConnection,
        faculty_id: i64,
        academic_year: Option<&str>,
        semester: Option<&str>,
    ) -> Result<Vec<EnrichedFacultyLoad>, ServiceError> {
        let loads = Self::get_in_term(db, Some(faculty_id), academic_year, semester).await?;
        Ok(loads.into_iter().map(|(_, enriched)| enriched).collect())
    }

    /// Distinct section labels a faculty member teaches in the given term
    pub async fn get_faculty_sections(
        db: &DatabaseConnection,
        faculty_id: i64,
        academic_year: Option<&str>,
        semester: Option<&str>,
    ) -> Result<Vec<String>, ServiceError> {
        let enriched = Self::get_enriched_loads(db, faculty_id, academic_year, semester).await?;
        Ok(distinct_section_labels(&enriched))
    }

    /// Distinct section labels across every faculty member's loads in the given term
    pub async fn get_all_sections(
        db: &DatabaseConnection,
        academic_year: Option<&str>,
        semester: Option<&str>,
    ) -> Result<Vec<String>, ServiceError> {
        let enriched: Vec<_> = Self::get_in_term(db, None, academic_year, semester)
            .await?
            .into_iter()
            .map(|(_, enriched)| enriched)
            .collect();

        Ok(distinct_section_labels(&enriched))
    }

    /// One page of enriched loads with student counts, plus the number of
    /// loads across all pages. Pages start at 1.
    pub async fn get_all_loads(
        db: &DatabaseConnection,
        faculty_id: Option<i64>,
        academic_year: Option<&str>,
        semester: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LoadSummary>, u64), ServiceError> {
        let loads = Self::get_in_term(db, faculty_id, academic_year, semester).await?;
        let total_items = loads.len() as u64;

        let skip = usize::try_from(page.saturating_sub(1).saturating_mul(per_page))
            .unwrap_or(usize::MAX);
        let take = usize::try_from(per_page).unwrap_or(usize::MAX);
        let page_loads: Vec<_> = loads.into_iter().skip(skip).take(take).collect();

        let program_ids: BTreeSet<i64> = page_loads
            .iter()
            .filter_map(|(load, _)| load.section_offering.as_ref())
            .map(|offering| offering.program_id)
            .collect();
        let students = Self::get_students(db, program_ids).await?;

        let summaries = page_loads
            .into_iter()
            .map(|(load, enriched)| LoadSummary {
                student_count: count_students_for_load(&load, &students),
                load: enriched,
            })
            .collect();

        Ok((summaries, total_items))
    }

    /// Validates and stores a new load.
    ///
    /// Nothing is written when validation fails.
    pub async fn create(
        db: &DatabaseConnection,
        draft: NewFacultyLoad,
    ) -> Result<EnrichedFacultyLoad, ServiceError> {
        let existing = Self::get_loads(db, draft.faculty_id).await?;
        validate_new_load(&draft, &existing)?;

        let now = Utc::now().naive_utc();
        let row = faculty_load::new_active_model(&draft, now).insert(db).await?;

        info!(
            "Created faculty load {} for faculty {}",
            row.id, draft.faculty_id
        );
        Ok(enrich(&into_load(draft, row.id)))
    }

    /// Applies a partial update to a load, optionally moving it to another
    /// offering or making it manual.
    ///
    /// A changed link is checked for duplicates against the faculty member's
    /// other loads before anything is written.
    pub async fn update(
        db: &DatabaseConnection,
        load_id: i64,
        patch: LoadDetails,
        kind: Option<LoadKind>,
        link: OfferingLink,
    ) -> Result<EnrichedFacultyLoad, ServiceError> {
        let current = Self::get_load(db, load_id).await?;
        let mut load = match link {
            OfferingLink::Keep => current,
            OfferingLink::Link(offering_id) => {
                let offering = SectionOfferingService::get_offering(db, offering_id).await?;
                relink(current, Some(offering))
            }
            OfferingLink::Unlink => relink(current, None),
        };

        load.details.apply(patch);
        if let Some(kind) = kind {
            load.kind = kind;
        }

        let mut active = faculty_load::ActiveModel {
            load_type: Set(load.kind.to_string()),
            updated_at: Set(Some(Utc::now().naive_utc())),
            ..Default::default()
        };
        faculty_load::set_details(&mut active, &load.details);

        if link != OfferingLink::Keep {
            let existing = Self::get_loads(db, load.faculty_id).await?;
            validate_update(&load, &existing)?;

            active.section_offering_id = Set(load.section_offering_id);
            active.subject_id = Set(load.section_offering.as_ref().map(|o| o.subject_id));
        }

        faculty_load::Entity::update_many()
            .set(active)
            .filter(faculty_load::Column::Id.eq(load.id))
            .exec(db)
            .await?;

        info!(
            "Updated faculty load {} (offering {:?})",
            load.id, load.section_offering_id
        );
        Ok(enrich(&load))
    }

    pub async fn delete(db: &DatabaseConnection, load_id: i64) -> Result<(), ServiceError> {
        let result = faculty_load::Entity::delete_by_id(load_id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound {
                entity: "faculty load",
                id: load_id,
            });
        }

        info!("Deleted faculty load {load_id}");
        Ok(())
    }

    /// Number of students in the program/year/section a load teaches
    pub async fn get_student_count(
        db: &DatabaseConnection,
        load_id: i64,
    ) -> Result<usize, ServiceError> {
        let load = Self::get_load(db, load_id).await?;
        let Some(offering) = load.section_offering.as_ref() else {
            return Ok(0);
        };

        let students = Self::get_students(db, BTreeSet::from([offering.program_id])).await?;
        Ok(count_students_for_load(&load, &students))
    }

    /// Placed students of the given programs; students without a year/section are skipped
    async fn get_students(
        db: &DatabaseConnection,
        program_ids: BTreeSet<i64>,
    ) -> Result<Vec<Student>, ServiceError> {
        if program_ids.is_empty() {
            return Ok(vec![]);
        }

        Ok(student::Entity::find()
            .filter(student::Column::ProgramId.is_in(program_ids))
            .find_also_related(year_section::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(student, year_section)| student.into_student(year_section))
            .collect())
    }
}
