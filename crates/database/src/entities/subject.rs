use super::hours;
use models::academic::Subject;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_code: Option<String>, // e.g. "IT401"
    pub subject_name: Option<String>,
    pub lec_hours: Option<i32>,
    pub lab_hours: Option<i32>,
    pub units: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::section_offering::Entity")]
    SectionOfferings,
}

impl Related<super::section_offering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionOfferings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subject {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            code: model.subject_code,
            name: model.subject_name,
            lec_hours: hours(model.lec_hours),
            lab_hours: hours(model.lab_hours),
            units: hours(model.units),
        }
    }
}
