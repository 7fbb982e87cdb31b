use super::{hours, stored_hours};
use log::warn;
use models::{
    academic::SectionOffering,
    load::{FacultyLoad, LoadDetails, LoadKind, NewFacultyLoad},
};
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faculty_loads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub faculty_id: i64,
    pub section_offering_id: Option<i64>,
    pub subject_id: Option<i64>,
    // Shadow fields; on linked loads these override the offering
    pub subject_code: Option<String>,
    pub subject_description: Option<String>,
    pub lec_hours: Option<i32>,
    pub lab_hours: Option<i32>,
    pub units: Option<i32>,
    pub section: Option<String>,
    pub schedule: Option<String>,
    pub room: Option<String>,
    #[sea_orm(column_name = "type")]
    pub load_type: String, // "Full-time" or "Part-time"
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section_offering::Entity",
        from = "Column::SectionOfferingId",
        to = "super::section_offering::Column::Id"
    )]
    SectionOffering,
}

impl Related<super::section_offering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionOffering.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn details(&self) -> LoadDetails {
        LoadDetails {
            subject_code: self.subject_code.clone(),
            subject_description: self.subject_description.clone(),
            lec_hours: hours(self.lec_hours),
            lab_hours: hours(self.lab_hours),
            units: hours(self.units),
            section: self.section.clone(),
            schedule: self.schedule.clone(),
            room: self.room.clone(),
            academic_year: self.academic_year.clone(),
            semester: self.semester.clone(),
        }
    }

    pub fn kind(&self) -> LoadKind {
        LoadKind::from_str(self.load_type.trim()).unwrap_or_else(|_| {
            warn!(
                "Faculty load {} has unknown type {:?}, treating as {}",
                self.id,
                self.load_type,
                LoadKind::default()
            );
            LoadKind::default()
        })
    }

    /// Builds the domain record; `section_offering` is the preloaded link, if any
    pub fn into_load(self, section_offering: Option<SectionOffering>) -> FacultyLoad {
        FacultyLoad {
            id: self.id,
            faculty_id: self.faculty_id,
            section_offering_id: self.section_offering_id,
            section_offering,
            kind: self.kind(),
            details: self.details(),
        }
    }
}

/// Writes every shadow field of `details` onto an active model
pub fn set_details(active: &mut ActiveModel, details: &LoadDetails) {
    active.subject_code = Set(details.subject_code.clone());
    active.subject_description = Set(details.subject_description.clone());
    active.lec_hours = Set(stored_hours(details.lec_hours));
    active.lab_hours = Set(stored_hours(details.lab_hours));
    active.units = Set(stored_hours(details.units));
    active.section = Set(details.section.clone());
    active.schedule = Set(details.schedule.clone());
    active.room = Set(details.room.clone());
    active.academic_year = Set(details.academic_year.clone());
    active.semester = Set(details.semester.clone());
}

/// Insert model for a validated draft; the id is assigned by the store
pub fn new_active_model(draft: &NewFacultyLoad, now: DateTime) -> ActiveModel {
    let mut active = ActiveModel {
        faculty_id: Set(draft.faculty_id),
        section_offering_id: Set(draft.section_offering.as_ref().map(|o| o.id)),
        subject_id: Set(draft.section_offering.as_ref().map(|o| o.subject_id)),
        load_type: Set(draft.kind.to_string()),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    };
    set_details(&mut active, &draft.details);
    active
}
