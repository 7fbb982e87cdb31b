use models::academic::Student;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub program_id: Option<i64>,
    pub year_section_id: Option<i64>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::year_section::Entity",
        from = "Column::YearSectionId",
        to = "super::year_section::Column::Id"
    )]
    YearSection,
}

impl Related<super::year_section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YearSection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Students without a year/section cannot be placed and yield `None`
    pub fn into_student(self, year_section: Option<super::year_section::Model>) -> Option<Student> {
        let year_section = year_section?;

        Some(Student {
            id: self.id,
            program_id: self.program_id,
            year_level: year_section.year_level,
            section: year_section.section,
        })
    }
}
