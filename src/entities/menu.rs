//! Menu entity - The published cardápio for a calendar date.
//!
//! Business expectation is one menu per date; `core::menu::create_menu`
//! checks for an existing row before inserting. Meal slots for both shifts
//! are created alongside the menu.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    /// Unique identifier for the menu
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calendar date this menu is published for
    pub date: Date,
    /// Main dish description
    pub main_dish: String,
    /// Vegetarian alternative, if offered
    pub vegetarian_dish: Option<String>,
    /// Dessert, if offered
    pub dessert: Option<String>,
    /// Drink, if offered
    pub drink: Option<String>,
    /// User ID of the admin who published the menu
    pub created_by: i64,
    /// When the menu was published
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Menu and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One menu has one meal slot per shift
    #[sea_orm(has_many = "super::meal::Entity")]
    Meals,
}

impl Related<super::meal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
