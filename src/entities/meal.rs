//! Meal entity - A refeição slot: one date + shift with a seating capacity.
//!
//! `confirmed_count` is only ever moved by the guarded atomic updates in
//! `core::attendance`, which keep it within `0..=capacity` under concurrent
//! confirmations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::MealShift;

/// Meal slot database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meals")]
pub struct Model {
    /// Unique identifier for the meal slot
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Menu this slot belongs to
    pub menu_id: i64,
    /// Calendar date of the meal (denormalized from the menu for lookups)
    pub date: Date,
    /// Shift served by this slot
    pub shift: MealShift,
    /// Maximum number of confirmations accepted
    pub capacity: i32,
    /// Number of active (non-cancelled) confirmations
    pub confirmed_count: i32,
}

/// Defines relationships between Meal and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each meal slot belongs to one menu
    #[sea_orm(
        belongs_to = "super::menu::Entity",
        from = "Column::MenuId",
        to = "super::menu::Column::Id"
    )]
    Menu,
    /// One meal slot has many attendance records
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendances,
}

impl Related<super::menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Seats still available in this slot.
    #[must_use]
    pub const fn remaining_seats(&self) -> i32 {
        self.capacity - self.confirmed_count
    }
}
