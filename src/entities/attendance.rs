//! Attendance entity - A presença record for one user at one meal slot.
//!
//! At most one non-cancelled attendance may exist per (user, meal); the
//! eligibility check in `core::attendance` enforces this before inserting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::AttendanceStatus;

/// Attendance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendances")]
pub struct Model {
    /// Unique identifier for the attendance record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User the record belongs to
    pub user_id: i64,
    /// Meal slot the record belongs to
    pub meal_id: i64,
    /// Current lifecycle status
    pub status: AttendanceStatus,
    /// When the confirmation was originally recorded
    pub confirmed_at: DateTimeUtc,
}

/// Defines relationships between Attendance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attendance belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each attendance belongs to one meal slot
    #[sea_orm(
        belongs_to = "super::meal::Entity",
        from = "Column::MealId",
        to = "super::meal::Column::Id"
    )]
    Meal,
    /// An absence may be referenced by at most one justification
    #[sea_orm(has_many = "super::justification::Entity")]
    Justifications,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::meal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meal.def()
    }
}

impl Related<super::justification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Justifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
