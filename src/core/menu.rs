//! Menu business logic - Publishing and querying the daily cardápio.
//!
//! Creating a menu also creates its two meal slots (lunch and dinner) with
//! the configured default capacity, inside a single database transaction.
//! Queries cover the public surface: today's menu, the current week, and a
//! whole month.

use crate::{
    entities::{Meal, MealShift, Menu, meal, menu},
    errors::{Error, Result},
};
use chrono::{Datelike, Days, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Input for publishing a new menu.
#[derive(Debug, Clone)]
pub struct NewMenu {
    /// Calendar date the menu is published for
    pub date: NaiveDate,
    /// Main dish description
    pub main_dish: String,
    /// Vegetarian alternative, if offered
    pub vegetarian_dish: Option<String>,
    /// Dessert, if offered
    pub dessert: Option<String>,
    /// Drink, if offered
    pub drink: Option<String>,
    /// Admin user publishing the menu
    pub created_by: i64,
}

/// Field changes for an existing menu. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MenuChanges {
    /// New main dish description
    pub main_dish: Option<String>,
    /// New vegetarian alternative
    pub vegetarian_dish: Option<Option<String>>,
    /// New dessert
    pub dessert: Option<Option<String>>,
    /// New drink
    pub drink: Option<Option<String>>,
}

/// Publishes a menu for a date, creating both meal slots alongside it.
///
/// One menu per calendar date is a business expectation: an existing menu on
/// the same date is rejected with `MenuAlreadyExists`. The check and the
/// inserts run in one database transaction.
pub async fn create_menu(
    db: &DatabaseConnection,
    new: NewMenu,
    default_capacity: i32,
) -> Result<menu::Model> {
    if new.main_dish.trim().is_empty() {
        return Err(Error::Validation {
            message: "main dish cannot be empty".to_string(),
        });
    }
    if default_capacity <= 0 {
        return Err(Error::Validation {
            message: format!("meal capacity must be positive, got {default_capacity}"),
        });
    }

    let txn = db.begin().await?;

    let existing = Menu::find()
        .filter(menu::Column::Date.eq(new.date))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::MenuAlreadyExists { date: new.date });
    }

    let now = Utc::now();
    let created = menu::ActiveModel {
        date: Set(new.date),
        main_dish: Set(new.main_dish.trim().to_string()),
        vegetarian_dish: Set(new.vegetarian_dish),
        dessert: Set(new.dessert),
        drink: Set(new.drink),
        created_by: Set(new.created_by),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for shift in [MealShift::Lunch, MealShift::Dinner] {
        meal::ActiveModel {
            menu_id: Set(created.id),
            date: Set(new.date),
            shift: Set(shift),
            capacity: Set(default_capacity),
            confirmed_count: Set(0),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(created)
}

/// Finds the menu published for a specific date, if any.
pub async fn menu_for_date(db: &DatabaseConnection, date: NaiveDate) -> Result<Option<menu::Model>> {
    Menu::find()
        .filter(menu::Column::Date.eq(date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the menus of the week containing `date` (Sunday through
/// Saturday), ordered by date.
pub async fn menus_for_week(db: &DatabaseConnection, date: NaiveDate) -> Result<Vec<menu::Model>> {
    let days_from_sunday = u64::from(date.weekday().num_days_from_sunday());
    let week_start = date - Days::new(days_from_sunday);
    let week_end = week_start + Days::new(6);

    Menu::find()
        .filter(menu::Column::Date.gte(week_start))
        .filter(menu::Column::Date.lte(week_end))
        .order_by_asc(menu::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the menus of a calendar month, ordered by date.
pub async fn menus_for_month(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
) -> Result<Vec<menu::Model>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| Error::Validation {
        message: format!("invalid month: {year}-{month}"),
    })?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| Error::Validation {
        message: format!("invalid month: {year}-{month}"),
    })?;

    Menu::find()
        .filter(menu::Column::Date.gte(first))
        .filter(menu::Column::Date.lt(next_month))
        .order_by_asc(menu::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the meal slots created alongside a menu.
pub async fn meals_for_menu(db: &DatabaseConnection, menu_id: i64) -> Result<Vec<meal::Model>> {
    Meal::find()
        .filter(meal::Column::MenuId.eq(menu_id))
        .order_by_asc(meal::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the meal slot for a date and shift, if any.
pub async fn meal_for<C>(db: &C, date: NaiveDate, shift: MealShift) -> Result<Option<meal::Model>>
where
    C: ConnectionTrait,
{
    Meal::find()
        .filter(meal::Column::Date.eq(date))
        .filter(meal::Column::Shift.eq(shift))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Applies admin edits to the menu published for a date.
pub async fn update_menu(
    db: &DatabaseConnection,
    date: NaiveDate,
    changes: MenuChanges,
) -> Result<menu::Model> {
    if let Some(dish) = &changes.main_dish
        && dish.trim().is_empty()
    {
        return Err(Error::Validation {
            message: "main dish cannot be empty".to_string(),
        });
    }

    let existing = menu_for_date(db, date)
        .await?
        .ok_or(Error::MenuNotFound { date })?;

    let mut active: menu::ActiveModel = existing.into();
    if let Some(dish) = changes.main_dish {
        active.main_dish = Set(dish.trim().to_string());
    }
    if let Some(veg) = changes.vegetarian_dish {
        active.vegetarian_dish = Set(veg);
    }
    if let Some(dessert) = changes.dessert {
        active.dessert = Set(dessert);
    }
    if let Some(drink) = changes.drink {
        active.drink = Set(drink);
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes the menu published for a date along with its meal slots.
pub async fn delete_menu(db: &DatabaseConnection, date: NaiveDate) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Menu::find()
        .filter(menu::Column::Date.eq(date))
        .one(&txn)
        .await?
        .ok_or(Error::MenuNotFound { date })?;

    Meal::delete_many()
        .filter(meal::Column::MenuId.eq(existing.id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
