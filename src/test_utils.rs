//! Shared test utilities for `Refeitorio`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{attendance, menu, weekday},
    entities::{self, MealShift},
    errors::{Error, Result},
    notify::{DecisionNotification, Notifier},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex};

/// A fixed Monday used across tests.
pub const TEST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 3, 4) {
    Some(date) => date,
    None => panic!("valid date"),
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Display name; registration and e-mail are derived from it
/// * `is_scholarship_holder` - Whether the user is a bolsista
pub async fn create_test_user(
    db: &DatabaseConnection,
    name: &str,
    is_scholarship_holder: bool,
) -> Result<entities::user::Model> {
    use sea_orm::{ActiveModelTrait, Set};

    let slug = name.to_lowercase().replace(' ', ".");
    entities::user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{slug}@example.edu")),
        registration: Set(format!("REG-{slug}")),
        is_scholarship_holder: Set(is_scholarship_holder),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test menu for a date with both meal slots at capacity 100.
/// An admin user is created on the fly to own the menu.
pub async fn create_test_menu(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<entities::menu::Model> {
    let admin = create_test_user(db, &format!("Admin {date}"), false).await?;
    menu::create_menu(
        db,
        menu::NewMenu {
            date,
            main_dish: "Arroz, feijão e frango grelhado".to_string(),
            vegetarian_dish: Some("Arroz, feijão e grão-de-bico".to_string()),
            dessert: None,
            drink: None,
            created_by: admin.id,
        },
        100,
    )
    .await
}

/// Sets up a database with a scholarship holder registered for every weekday
/// and a menu on [`TEST_DATE`]. Returns (db, user, lunch slot).
pub async fn setup_with_meal() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::meal::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "Ana", true).await?;
    weekday::replace_weekdays(&db, user.id, &[0, 1, 2, 3, 4, 5, 6]).await?;
    create_test_menu(&db, TEST_DATE).await?;
    let slot = menu::meal_for(&db, TEST_DATE, MealShift::Lunch)
        .await?
        .ok_or(Error::MealNotFound {
            date: TEST_DATE,
            shift: MealShift::Lunch,
        })?;
    Ok((db, user, slot))
}

/// Sets up a database with a user whose lunch confirmation on [`TEST_DATE`]
/// was marked an unjustified absence - the starting point for justification
/// tests. Returns (db, user, absence record).
pub async fn setup_with_absence() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::attendance::Model,
)> {
    let (db, user, _slot) = setup_with_meal().await?;
    let record =
        attendance::confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await?;
    let absence = attendance::mark_absent(&db, record.id).await?;
    Ok((db, user, absence))
}

/// Notifier that records everything it is asked to send.
/// The failing variant errors on every send, for delivery-failure tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<DecisionNotification>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose every send fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Everything successfully sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<DecisionNotification> {
        self.sent.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, notification: DecisionNotification) -> Result<()> {
        if self.fail {
            return Err(Error::Config {
                message: "mail channel down".to_string(),
            });
        }
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(notification);
        }
        Ok(())
    }
}
