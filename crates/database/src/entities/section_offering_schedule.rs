use models::schedule::ScheduleEntry;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "section_offering_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub section_offering_id: i64,
    pub day: String, // e.g. "Monday"
    pub start_time: Time,
    pub end_time: Time,
    pub room: Option<String>,
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

impl From<Model> for ScheduleEntry {
    fn from(model: Model) -> Self {
        ScheduleEntry::from_stored(model.day, model.start_time, model.end_time, model.room)
    }
}
