//! Notebook entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notebooks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(nullable)]
    pub volunteer_id: Option<i32>,
    #[sea_orm(nullable)]
    pub pep_id: Option<i32>,
    pub student_name: String,
    #[sea_orm(nullable)]
    pub student_registration: Option<String>,
    #[sea_orm(nullable)]
    pub student_prison_unit: Option<String>,
    #[sea_orm(nullable)]
    pub evaluator_name: Option<String>,
    #[sea_orm(nullable)]
    pub evaluator_email: Option<String>,
    /// JSON array of subject answers
    #[sea_orm(column_type = "Text")]
    pub subjects: String,
    /// JSON array of question answers
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    #[sea_orm(nullable, column_type = "Text")]
    pub relevant_content: Option<String>,
    #[sea_orm(nullable, column_type = "Text")]
    pub conclusion: Option<String>,
    pub approved: bool,
    pub archives_exclusion: bool,
    #[sea_orm(nullable)]
    pub reserved_at: Option<DateTime<Utc>>,
    #[sea_orm(nullable)]
    pub evaluated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::volunteer::Entity",
        from = "Column::VolunteerId",
        to = "super::volunteer::Column::Id"
    )]
    Volunteer,
    #[sea_orm(
        belongs_to = "super::pep_class::Entity",
        from = "Column::PepId",
        to = "super::pep_class::Column::Id"
    )]
    PepClass,
}

impl Related<super::volunteer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Volunteer.def()
    }
}

impl Related<super::pep_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PepClass.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
