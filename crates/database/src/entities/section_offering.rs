use super::{hours, stored_hours};
use models::{
    academic::{Program, SectionOffering, Subject},
    schedule::ScheduleEntry,
};
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "section_offerings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub program_id: i64,
    pub subject_id: i64,
    pub academic_year: String, // e.g. "2024-2025"
    pub semester: String,      // e.g. "First", "2nd Semester", "Summer"
    pub year_level: String,    // e.g. "4", "Fourth Year"
    pub parent_section: String,
    pub slots: Option<i32>,
    pub lec_hours: Option<i32>,
    pub lab_hours: Option<i32>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::program::Entity",
        from = "Column::ProgramId",
        to = "super::program::Column::Id"
    )]
    Program,
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
    #[sea_orm(has_many = "super::section_offering_schedule::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::faculty_load::Entity")]
    FacultyLoads,
}

impl Related<super::program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::section_offering_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::faculty_load::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FacultyLoads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Builds the domain record from this row and its preloaded associations
    pub fn into_offering(
        self,
        program: Option<Program>,
        subject: Option<Subject>,
        schedules: Vec<ScheduleEntry>,
    ) -> SectionOffering {
        SectionOffering {
            id: self.id,
            program_id: self.program_id,
            subject_id: self.subject_id,
            program,
            subject,
            academic_year: self.academic_year,
            semester: self.semester,
            year_level: self.year_level,
            parent_section: self.parent_section,
            lec_hours: hours(self.lec_hours),
            lab_hours: hours(self.lab_hours),
            slots: hours(self.slots),
            schedules,
        }
    }
}

/// Insert model for a new offering; the id is assigned by the store
pub fn new_active_model(offering: &SectionOffering, now: DateTime) -> ActiveModel {
    ActiveModel {
        program_id: Set(offering.program_id),
        subject_id: Set(offering.subject_id),
        academic_year: Set(offering.academic_year.trim().to_owned()),
        semester: Set(offering.semester.trim().to_owned()),
        year_level: Set(offering.year_level.trim().to_owned()),
        parent_section: Set(offering.parent_section.trim().to_owned()),
        slots: Set(stored_hours(offering.slots)),
        lec_hours: Set(stored_hours(offering.lec_hours)),
        lab_hours: Set(stored_hours(offering.lab_hours)),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    }
}
