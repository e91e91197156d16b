//! Entity-to-response transformations.
//!
//! Resources flatten nested entities into the shape the API returns:
//! weekday numbers become Portuguese display names, dates render as
//! `dd/mm/yyyy`, timestamps as `dd/mm/yyyy HH:MM`. Optional relations are
//! explicit `Option` fields on the view model; absent ones are skipped in
//! the serialized output.

use crate::core::weekday::Weekday;
use crate::entities::{attendance, justification, meal, menu, user};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Formats a calendar date in the fixed pt-BR style.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats a timestamp in the fixed pt-BR style.
#[must_use]
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// Serialized menu, with meal slots when the caller loaded them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MenuResource {
    /// Menu id
    pub id: i64,
    /// Date as `dd/mm/yyyy`
    pub date: String,
    /// Portuguese weekday name for the date
    pub weekday: String,
    /// Main dish
    pub main_dish: String,
    /// Vegetarian alternative, when offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vegetarian_dish: Option<String>,
    /// Dessert, when offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dessert: Option<String>,
    /// Drink, when offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drink: Option<String>,
    /// Meal slots, only when the caller loaded them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals: Option<Vec<MealResource>>,
}

impl MenuResource {
    /// Shapes a menu, optionally with its meal slots.
    #[must_use]
    pub fn from_model(model: &menu::Model, meals: Option<&[meal::Model]>) -> Self {
        Self {
            id: model.id,
            date: format_date(model.date),
            weekday: Weekday::from_date(model.date).display_name().to_string(),
            main_dish: model.main_dish.clone(),
            vegetarian_dish: model.vegetarian_dish.clone(),
            dessert: model.dessert.clone(),
            drink: model.drink.clone(),
            meals: meals.map(|slots| slots.iter().map(MealResource::from_model).collect()),
        }
    }
}

/// Serialized meal slot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MealResource {
    /// Meal slot id
    pub id: i64,
    /// Date as `dd/mm/yyyy`
    pub date: String,
    /// Shift display name ("Almoço" / "Jantar")
    pub shift: String,
    /// Seating capacity
    pub capacity: i32,
    /// Active confirmations
    pub confirmed_count: i32,
    /// Seats still available
    pub remaining_seats: i32,
}

impl MealResource {
    /// Shapes a meal slot.
    #[must_use]
    pub fn from_model(model: &meal::Model) -> Self {
        Self {
            id: model.id,
            date: format_date(model.date),
            shift: model.shift.display_name().to_string(),
            capacity: model.capacity,
            confirmed_count: model.confirmed_count,
            remaining_seats: model.remaining_seats(),
        }
    }
}

/// Fully-specified input for shaping an attendance response.
///
/// The caller states exactly which relations it loaded; the transformation
/// never fetches anything on its own.
#[derive(Debug, Clone)]
pub struct AttendanceView {
    /// The attendance record itself
    pub attendance: attendance::Model,
    /// The owning user, when loaded
    pub user: Option<user::Model>,
    /// The meal slot, when loaded
    pub meal: Option<meal::Model>,
}

/// Serialized attendance record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceResource {
    /// Attendance id
    pub id: i64,
    /// Status storage value ("confirmed", "validated", ...)
    pub status: crate::entities::AttendanceStatus,
    /// Portuguese status display name
    pub status_display: String,
    /// Confirmation timestamp as `dd/mm/yyyy HH:MM`
    pub confirmed_at: String,
    /// Student name, when the user relation was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Student registration code, when the user relation was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_registration: Option<String>,
    /// Meal slot, when that relation was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<MealResource>,
}

impl AttendanceResource {
    /// Shapes an attendance record from an explicit view model.
    #[must_use]
    pub fn from_view(view: &AttendanceView) -> Self {
        Self {
            id: view.attendance.id,
            status: view.attendance.status,
            status_display: view.attendance.status.display_name().to_string(),
            confirmed_at: format_datetime(view.attendance.confirmed_at),
            user_name: view.user.as_ref().map(|u| u.name.clone()),
            user_registration: view.user.as_ref().map(|u| u.registration.clone()),
            meal: view.meal.as_ref().map(MealResource::from_model),
        }
    }
}

/// Fully-specified input for shaping a justification response.
#[derive(Debug, Clone)]
pub struct JustificationView {
    /// The justification itself
    pub justification: justification::Model,
    /// The absence it covers, when loaded
    pub attendance: Option<AttendanceView>,
}

/// Serialized justification.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JustificationResource {
    /// Justification id
    pub id: i64,
    /// Status storage value ("pending", "approved", "rejected")
    pub status: crate::entities::JustificationStatus,
    /// Portuguese status display name
    pub status_display: String,
    /// Student-supplied reason
    pub reason: String,
    /// Admin note, once a decision carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    /// Decision timestamp as `dd/mm/yyyy HH:MM`, once decided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<String>,
    /// Submission timestamp as `dd/mm/yyyy HH:MM`
    pub created_at: String,
    /// The absence under review, when that relation was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceResource>,
}

impl JustificationResource {
    /// Shapes a justification from an explicit view model.
    #[must_use]
    pub fn from_view(view: &JustificationView) -> Self {
        Self {
            id: view.justification.id,
            status: view.justification.status,
            status_display: view.justification.status.display_name().to_string(),
            reason: view.justification.reason.clone(),
            admin_note: view.justification.admin_note.clone(),
            decided_at: view.justification.decided_at.map(format_datetime),
            created_at: format_datetime(view.justification.created_at),
            attendance: view.attendance.as_ref().map(AttendanceResource::from_view),
        }
    }
}
