//! Volunteer entity
//!
//! List-valued answers (`workshops`, `roles_pep`, `interest_future_roles`)
//! are kept as JSON arrays in text columns.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "volunteers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[sea_orm(nullable)]
    pub pep_id: Option<i32>,
    #[sea_orm(nullable)]
    pub password_hash: Option<String>,
    /// Name of the authorization profile
    #[sea_orm(nullable)]
    pub authorization: Option<String>,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    #[sea_orm(nullable)]
    pub disability: Option<String>,
    pub how_found_pep: String,
    pub knowledge_pep: String,
    #[sea_orm(column_type = "Text")]
    pub workshops: String,
    pub schooling: String,
    #[sea_orm(nullable)]
    pub bachelor: Option<String>,
    pub studies_knowledge: String,
    pub life_experience: String,
    pub desires: String,
    #[sea_orm(column_type = "Text")]
    pub roles_pep: String,
    #[sea_orm(column_type = "Text")]
    pub interest_future_roles: String,
    pub need_declaration: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendances,
    #[sea_orm(has_many = "super::notebook::Entity")]
    Notebooks,
    #[sea_orm(has_many = "super::volunteer_hours::Entity")]
    Hours,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

impl Related<super::notebook::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notebooks.def()
    }
}

impl Related<super::volunteer_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hours.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
