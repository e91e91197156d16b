//! Registered-weekday business logic.
//!
//! Weekdays are numbered 0 (Sunday) through 6 (Saturday), matching the
//! numbering used by the public API. The `Weekday` newtype keeps invalid
//! numbers out of the domain, and `WeekdaySet` renders a registered set in
//! display order ("Segunda, Quarta, Sexta") for error payloads and mail
//! bodies.

use crate::{
    entities::{UserWeekday, user_weekday},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;

/// Portuguese weekday display names, indexed 0 (Sunday) through 6 (Saturday).
const WEEKDAY_NAMES: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

/// A validated weekday number, 0 (Sunday) through 6 (Saturday).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Weekday(u8);

impl Weekday {
    /// Creates a weekday from a raw number, rejecting anything outside 0-6.
    pub fn new(number: i32) -> Result<Self> {
        u8::try_from(number)
            .ok()
            .filter(|n| *n <= 6)
            .map(Self)
            .ok_or_else(|| Error::Validation {
                message: format!("weekday must be between 0 and 6, got {number}"),
            })
    }

    /// The weekday of a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // num_days_from_sunday is 0-6 by construction
        Self(date.weekday().num_days_from_sunday() as u8)
    }

    /// Raw weekday number, 0-6.
    #[must_use]
    pub const fn number(self) -> i32 {
        self.0 as i32
    }

    /// Portuguese display name ("Segunda", "Terça", ...).
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        WEEKDAY_NAMES[self.0 as usize]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An ordered set of registered weekdays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekdaySet(Vec<Weekday>);

impl WeekdaySet {
    /// Builds a set from raw numbers, deduplicating and sorting.
    pub fn from_numbers(numbers: &[i32]) -> Result<Self> {
        let mut days = numbers
            .iter()
            .map(|n| Weekday::new(*n))
            .collect::<Result<Vec<_>>>()?;
        days.sort_unstable();
        days.dedup();
        Ok(Self(days))
    }

    /// Whether the set contains the given weekday.
    #[must_use]
    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    /// The weekdays in the set, sorted ascending.
    #[must_use]
    pub fn days(&self) -> &[Weekday] {
        &self.0
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|d| d.display_name()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Retrieves the weekdays a user is registered to eat on, sorted ascending.
pub async fn registered_weekdays<C>(db: &C, user_id: i64) -> Result<WeekdaySet>
where
    C: ConnectionTrait,
{
    let rows = UserWeekday::find()
        .filter(user_weekday::Column::UserId.eq(user_id))
        .order_by_asc(user_weekday::Column::Weekday)
        .all(db)
        .await?;

    let numbers: Vec<i32> = rows.iter().map(|r| r.weekday).collect();
    WeekdaySet::from_numbers(&numbers)
}

/// Replaces a user's registered weekdays with a new set.
///
/// Enrollment updates replace the whole set: existing rows are deleted and
/// the new ones inserted inside a single database transaction, so a failure
/// never leaves the user with a partial registration.
pub async fn replace_weekdays(
    db: &DatabaseConnection,
    user_id: i64,
    weekdays: &[i32],
) -> Result<WeekdaySet> {
    let set = WeekdaySet::from_numbers(weekdays)?;

    let txn = db.begin().await?;

    UserWeekday::delete_many()
        .filter(user_weekday::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    for day in set.days() {
        let row = user_weekday::ActiveModel {
            user_id: Set(user_id),
            weekday: Set(day.number()),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    txn.commit().await?;

    Ok(set)
}
