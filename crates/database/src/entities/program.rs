use models::academic::Program;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "programs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub program_code: Option<String>, // e.g. "BSIT"
    pub program_name: Option<String>,
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

impl From<Model> for Program {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            code: model.program_code,
            name: model.program_name,
        }
    }
}
