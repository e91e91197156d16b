//! Registered weekday entity - The weekdays a scholarship holder may eat.
//!
//! Rows are replaced wholesale when an enrollment is updated; see
//! `core::weekday::replace_weekdays`. Weekday numbering is 0 = Sunday through
//! 6 = Saturday.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Registered weekday database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_weekdays")]
pub struct Model {
    /// Unique identifier for the registration row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User this registration belongs to
    pub user_id: i64,
    /// Weekday number, 0 (Sunday) through 6 (Saturday)
    pub weekday: i32,
}

/// Defines relationships between `UserWeekday` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each registration row belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
