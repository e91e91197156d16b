//! User entity - Students and staff known to the cafeteria system.
//!
//! Scholarship holders (bolsistas) are flagged here; only they may confirm
//! attendance, and only on the weekdays registered in `user_weekdays`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full display name
    pub name: String,
    /// Institutional e-mail address, target of decision notifications
    pub email: String,
    /// Institutional registration code (matrícula)
    pub registration: String,
    /// Whether this user is a scholarship holder entitled to subsidized meals
    pub is_scholarship_holder: bool,
    /// Inactive users keep their history but cannot confirm attendance
    pub active: bool,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many attendance records
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendances,
    /// One user owns its set of registered weekdays
    #[sea_orm(has_many = "super::user_weekday::Entity")]
    Weekdays,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

impl Related<super::user_weekday::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weekdays.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
