//! Attendance business logic - Confirming, validating, and cancelling
//! presença records.
//!
//! The confirmation path runs the whole eligibility ladder and the seat
//! increment inside one database transaction. The seat itself is taken with
//! a guarded atomic update (`confirmed_count = confirmed_count + 1 WHERE
//! confirmed_count < capacity`), so the confirmed count can never exceed the
//! slot capacity even under concurrent confirmations, and each accepted
//! confirmation increments it exactly once.

use crate::{
    core::weekday::{self, Weekday},
    entities::{Attendance, AttendanceStatus, Meal, MealShift, User, attendance, meal},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::Expr};

/// Confirms a scholarship holder's attendance at a meal slot.
///
/// The eligibility ladder, in order:
/// 1. a shift must be supplied (`ShiftRequired`);
/// 2. the user must exist (`UserNotFound`) and be an active scholarship
///    holder (`NotScholarshipHolder`);
/// 3. the date's weekday must be in the user's registered set
///    (`NoMealRightOnWeekday`, carrying the registered set for display);
/// 4. a meal slot must exist for date+shift (`MealNotFound`);
/// 5. the user must not already hold a non-cancelled confirmation for the
///    slot (`AlreadyConfirmed`, carrying the original record's id and
///    timestamp);
/// 6. the slot must have a free seat (`MealAtCapacity`).
///
/// On success a new attendance record in `Confirmed` status is returned.
pub async fn confirm_attendance(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
    shift: Option<MealShift>,
) -> Result<attendance::Model> {
    let Some(shift) = shift else {
        return Err(Error::ShiftRequired);
    };

    let txn = db.begin().await?;

    let user = User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound { user_id })?;
    if !user.is_scholarship_holder || !user.active {
        return Err(Error::NotScholarshipHolder { user_id });
    }

    let attempted = Weekday::from_date(date);
    let registered = weekday::registered_weekdays(&txn, user_id).await?;
    if !registered.contains(attempted) {
        return Err(Error::NoMealRightOnWeekday {
            user_id,
            attempted,
            registered,
        });
    }

    let slot = crate::core::menu::meal_for(&txn, date, shift)
        .await?
        .ok_or(Error::MealNotFound { date, shift })?;

    let existing = Attendance::find()
        .filter(attendance::Column::UserId.eq(user_id))
        .filter(attendance::Column::MealId.eq(slot.id))
        .filter(attendance::Column::Status.ne(AttendanceStatus::Cancelled))
        .one(&txn)
        .await?;
    if let Some(previous) = existing {
        return Err(Error::AlreadyConfirmed {
            attendance_id: previous.id,
            confirmed_at: previous.confirmed_at,
        });
    }

    // Take the seat. The capacity guard is part of the UPDATE itself: zero
    // rows affected means another confirmation took the last seat first.
    let taken = Meal::update_many()
        .col_expr(
            meal::Column::ConfirmedCount,
            Expr::col(meal::Column::ConfirmedCount).add(1),
        )
        .filter(meal::Column::Id.eq(slot.id))
        .filter(Expr::col(meal::Column::ConfirmedCount).lt(Expr::col(meal::Column::Capacity)))
        .exec(&txn)
        .await?;
    if taken.rows_affected == 0 {
        return Err(Error::MealAtCapacity {
            meal_id: slot.id,
            capacity: slot.capacity,
        });
    }

    let record = attendance::ActiveModel {
        user_id: Set(user_id),
        meal_id: Set(slot.id),
        status: Set(AttendanceStatus::Confirmed),
        confirmed_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(record)
}

/// Cancels a confirmed attendance and releases its seat.
///
/// Only a `Confirmed` record can be cancelled; anything else (including a
/// second cancellation) is an `InvalidAttendanceTransition`.
pub async fn cancel_attendance(
    db: &DatabaseConnection,
    attendance_id: i64,
) -> Result<attendance::Model> {
    let txn = db.begin().await?;

    let record = Attendance::find_by_id(attendance_id)
        .one(&txn)
        .await?
        .ok_or(Error::AttendanceNotFound { attendance_id })?;
    if record.status != AttendanceStatus::Confirmed {
        return Err(Error::InvalidAttendanceTransition { attendance_id });
    }

    let meal_id = record.meal_id;
    let mut active: attendance::ActiveModel = record.into();
    active.status = Set(AttendanceStatus::Cancelled);
    let updated = active.update(&txn).await?;

    // Release the seat; the guard keeps the counter from going negative
    Meal::update_many()
        .col_expr(
            meal::Column::ConfirmedCount,
            Expr::col(meal::Column::ConfirmedCount).sub(1),
        )
        .filter(meal::Column::Id.eq(meal_id))
        .filter(meal::Column::ConfirmedCount.gt(0))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(updated)
}

/// Marks a confirmed presence as validated at the counter (admin action).
pub async fn validate_attendance(
    db: &DatabaseConnection,
    attendance_id: i64,
) -> Result<attendance::Model> {
    transition(db, attendance_id, AttendanceStatus::Validated).await
}

/// Marks a confirmed presence that was never validated as an unjustified
/// absence (system/admin action after the meal). The seat was consumed, so
/// the slot counter is left untouched.
pub async fn mark_absent(
    db: &DatabaseConnection,
    attendance_id: i64,
) -> Result<attendance::Model> {
    transition(db, attendance_id, AttendanceStatus::UnjustifiedAbsence).await
}

/// Moves a `Confirmed` record to a terminal review status.
async fn transition(
    db: &DatabaseConnection,
    attendance_id: i64,
    target: AttendanceStatus,
) -> Result<attendance::Model> {
    let record = Attendance::find_by_id(attendance_id)
        .one(db)
        .await?
        .ok_or(Error::AttendanceNotFound { attendance_id })?;
    if record.status != AttendanceStatus::Confirmed {
        return Err(Error::InvalidAttendanceTransition { attendance_id });
    }

    let mut active: attendance::ActiveModel = record.into();
    active.status = Set(target);
    active.update(db).await.map_err(Into::into)
}

/// Retrieves a specific attendance record by its unique ID.
pub async fn get_attendance_by_id(
    db: &DatabaseConnection,
    attendance_id: i64,
) -> Result<Option<attendance::Model>> {
    Attendance::find_by_id(attendance_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all attendance records for a meal slot.
pub async fn attendances_for_meal(
    db: &DatabaseConnection,
    meal_id: i64,
) -> Result<Vec<attendance::Model>> {
    Attendance::find()
        .filter(attendance::Column::MealId.eq(meal_id))
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::weekday::replace_weekdays;
    use crate::test_utils::{
        TEST_DATE, create_test_menu, create_test_user, setup_test_db, setup_with_meal,
    };

    #[tokio::test]
    async fn test_confirm_requires_shift() -> Result<()> {
        let (db, user, _meal) = setup_with_meal().await?;

        let result = confirm_attendance(&db, user.id, TEST_DATE, None).await;
        assert!(matches!(result.unwrap_err(), Error::ShiftRequired));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_user_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = confirm_attendance(&db, 999, TEST_DATE, Some(MealShift::Lunch)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::UserNotFound { user_id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_requires_scholarship() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "Carlos", false).await?;
        create_test_menu(&db, TEST_DATE).await?;

        let result = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotScholarshipHolder { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_eligibility_matches_registered_weekdays() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "Ana", true).await?;
        // Monday, Wednesday, Friday
        replace_weekdays(&db, user.id, &[1, 3, 5]).await?;

        // A Tuesday
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        create_test_menu(&db, tuesday).await?;

        let result = confirm_attendance(&db, user.id, tuesday, Some(MealShift::Lunch)).await;
        let err = result.unwrap_err();
        match &err {
            Error::NoMealRightOnWeekday {
                attempted,
                registered,
                ..
            } => {
                assert_eq!(attempted.display_name(), "Terça");
                assert_eq!(registered.to_string(), "Segunda, Quarta, Sexta");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // A Wednesday is in the registered set
        let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        create_test_menu(&db, wednesday).await?;
        let record = confirm_attendance(&db, user.id, wednesday, Some(MealShift::Lunch)).await?;
        assert_eq!(record.status, AttendanceStatus::Confirmed);

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_meal_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "Ana", true).await?;
        replace_weekdays(&db, user.id, &[0, 1, 2, 3, 4, 5, 6]).await?;

        // No menu published for this date
        let result = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Dinner)).await;
        assert!(matches!(result.unwrap_err(), Error::MealNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_double_confirmation_is_idempotent_rejection() -> Result<()> {
        let (db, user, slot) = setup_with_meal().await?;

        let first = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await?;

        let second = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await;
        match second.unwrap_err() {
            Error::AlreadyConfirmed {
                attendance_id,
                confirmed_at,
            } => {
                assert_eq!(attendance_id, first.id);
                assert_eq!(confirmed_at, first.confirmed_at);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The counter moved exactly once
        let updated = Meal::find_by_id(slot.id).one(&db).await?.unwrap();
        assert_eq!(updated.confirmed_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_rejected_at_capacity() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "Admin", false).await?;

        // Slot with a single seat
        crate::core::menu::create_menu(
            &db,
            crate::core::menu::NewMenu {
                date: TEST_DATE,
                main_dish: "Arroz e feijão".to_string(),
                vegetarian_dish: None,
                dessert: None,
                drink: None,
                created_by: admin.id,
            },
            1,
        )
        .await?;

        let first_user = create_test_user(&db, "Ana", true).await?;
        replace_weekdays(&db, first_user.id, &[0, 1, 2, 3, 4, 5, 6]).await?;
        let second_user = create_test_user(&db, "Bruno", true).await?;
        replace_weekdays(&db, second_user.id, &[0, 1, 2, 3, 4, 5, 6]).await?;

        confirm_attendance(&db, first_user.id, TEST_DATE, Some(MealShift::Lunch)).await?;

        let result =
            confirm_attendance(&db, second_user.id, TEST_DATE, Some(MealShift::Lunch)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MealAtCapacity { capacity: 1, .. }
        ));

        // The counter never exceeds capacity
        let slot = crate::core::menu::meal_for(&db, TEST_DATE, MealShift::Lunch)
            .await?
            .unwrap();
        assert_eq!(slot.confirmed_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_releases_seat_and_allows_reconfirmation() -> Result<()> {
        let (db, user, slot) = setup_with_meal().await?;

        let record = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await?;
        let cancelled = cancel_attendance(&db, record.id).await?;
        assert_eq!(cancelled.status, AttendanceStatus::Cancelled);

        let updated = Meal::find_by_id(slot.id).one(&db).await?.unwrap();
        assert_eq!(updated.confirmed_count, 0);

        // Cancelled records do not block a fresh confirmation
        let again = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await?;
        assert_ne!(again.id, record.id);

        // Cancelling twice is an error
        let result = cancel_attendance(&db, record.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAttendanceTransition { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_attendance() -> Result<()> {
        let (db, user, _slot) = setup_with_meal().await?;

        let record = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await?;
        let validated = validate_attendance(&db, record.id).await?;
        assert_eq!(validated.status, AttendanceStatus::Validated);

        // A validated presence cannot be validated or absented again
        assert!(validate_attendance(&db, record.id).await.is_err());
        assert!(mark_absent(&db, record.id).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_absent_keeps_seat() -> Result<()> {
        let (db, user, slot) = setup_with_meal().await?;

        let record = confirm_attendance(&db, user.id, TEST_DATE, Some(MealShift::Lunch)).await?;
        let absent = mark_absent(&db, record.id).await?;
        assert_eq!(absent.status, AttendanceStatus::UnjustifiedAbsence);

        // The seat was consumed either way
        let updated = Meal::find_by_id(slot.id).one(&db).await?.unwrap();
        assert_eq!(updated.confirmed_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_transition_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(matches!(
            cancel_attendance(&db, 42).await.unwrap_err(),
            Error::AttendanceNotFound { attendance_id: 42 }
        ));
        assert!(matches!(
            validate_attendance(&db, 42).await.unwrap_err(),
            Error::AttendanceNotFound { attendance_id: 42 }
        ));

        Ok(())
    }
}
