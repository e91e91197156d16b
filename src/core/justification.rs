//! Justification business logic - Submitting and deciding absence
//! justifications.
//!
//! The state machine is deliberately small: `pending -> approved` and
//! `pending -> rejected`, both terminal. The decision and the resulting
//! attendance status change are persisted in one database transaction;
//! the student notification is queued after commit and can never roll the
//! decision back.

use crate::{
    entities::{
        Attendance, AttendanceStatus, Justification, JustificationStatus, User, attendance,
        justification,
    },
    errors::{Error, Result},
    notify::{DecisionNotification, Notifier, NotificationKind, queue_decision_notification},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::warn;

/// An admin's decision on a pending justification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Accept the justification
    Approve,
    /// Refuse the justification
    Reject,
}

impl Decision {
    /// Terminal justification status this decision produces.
    #[must_use]
    pub const fn justification_status(self) -> JustificationStatus {
        match self {
            Self::Approve => JustificationStatus::Approved,
            Self::Reject => JustificationStatus::Rejected,
        }
    }

    /// Attendance status the associated absence ends up with.
    #[must_use]
    pub const fn attendance_status(self) -> AttendanceStatus {
        match self {
            Self::Approve => AttendanceStatus::JustifiedAbsence,
            Self::Reject => AttendanceStatus::UnjustifiedAbsence,
        }
    }

    /// Notification kind sent to the student.
    #[must_use]
    pub const fn notification_kind(self) -> NotificationKind {
        match self {
            Self::Approve => NotificationKind::JustificationApproved,
            Self::Reject => NotificationKind::JustificationRejected,
        }
    }
}

/// Opens a justification for an unjustified absence.
///
/// Guards, in order: the attendance record must exist, it must currently be
/// an `UnjustifiedAbsence`, it must not already have a justification, and the
/// reason must be non-empty. The new justification starts `Pending`.
pub async fn submit_justification(
    db: &DatabaseConnection,
    attendance_id: i64,
    reason: &str,
) -> Result<justification::Model> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(Error::Validation {
            message: "justification reason cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let record = Attendance::find_by_id(attendance_id)
        .one(&txn)
        .await?
        .ok_or(Error::AttendanceNotFound { attendance_id })?;
    if record.status != AttendanceStatus::UnjustifiedAbsence {
        return Err(Error::InvalidAttendanceTransition { attendance_id });
    }

    let existing = Justification::find()
        .filter(justification::Column::AttendanceId.eq(attendance_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::JustificationAlreadyExists { attendance_id });
    }

    let created = justification::ActiveModel {
        attendance_id: Set(attendance_id),
        reason: Set(reason.to_string()),
        status: Set(JustificationStatus::Pending),
        admin_note: Set(None),
        decided_at: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(created)
}

/// Decides a pending justification and updates the associated absence.
///
/// A justification can be decided exactly once; a second attempt fails with
/// `JustificationAlreadyDecided` carrying the terminal status and decision
/// timestamp, and leaves the attendance untouched. After the transaction
/// commits, a notification summarizing the decision is queued to the student
/// fire-and-forget.
pub async fn decide_justification<N: Notifier>(
    db: &DatabaseConnection,
    notifier: &N,
    justification_id: i64,
    decision: Decision,
    admin_note: Option<String>,
) -> Result<justification::Model> {
    let txn = db.begin().await?;

    let record = Justification::find_by_id(justification_id)
        .one(&txn)
        .await?
        .ok_or(Error::JustificationNotFound { justification_id })?;
    if record.status != JustificationStatus::Pending {
        return Err(Error::JustificationAlreadyDecided {
            justification_id,
            status: record.status,
            decided_at: record.decided_at,
        });
    }

    let absence = Attendance::find_by_id(record.attendance_id)
        .one(&txn)
        .await?
        .ok_or(Error::AttendanceNotFound {
            attendance_id: record.attendance_id,
        })?;

    let mut active: justification::ActiveModel = record.into();
    active.status = Set(decision.justification_status());
    active.admin_note = Set(admin_note);
    active.decided_at = Set(Some(Utc::now()));
    let decided = active.update(&txn).await?;

    let mut absence_active: attendance::ActiveModel = absence.clone().into();
    absence_active.status = Set(decision.attendance_status());
    absence_active.update(&txn).await?;

    txn.commit().await?;

    // The decision is durable at this point. Building or queueing the
    // notification may fail; that is logged, never propagated.
    match build_notification(db, &decided, &absence, decision).await {
        Ok(notification) => {
            queue_decision_notification(notifier, notification);
        }
        Err(err) => {
            warn!(
                error = %err,
                justification_id,
                "could not build decision notification"
            );
        }
    }

    Ok(decided)
}

/// Retrieves a specific justification by its unique ID.
pub async fn get_justification_by_id(
    db: &DatabaseConnection,
    justification_id: i64,
) -> Result<Option<justification::Model>> {
    Justification::find_by_id(justification_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all justifications awaiting review, oldest first.
pub async fn pending_justifications(db: &DatabaseConnection) -> Result<Vec<justification::Model>> {
    Justification::find()
        .filter(justification::Column::Status.eq(JustificationStatus::Pending))
        .order_by_asc(justification::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads the student and meal context for a decided justification.
async fn build_notification(
    db: &DatabaseConnection,
    decided: &justification::Model,
    absence: &attendance::Model,
    decision: Decision,
) -> Result<DecisionNotification> {
    let student = User::find_by_id(absence.user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound {
            user_id: absence.user_id,
        })?;
    let slot = crate::entities::Meal::find_by_id(absence.meal_id)
        .one(db)
        .await?
        .ok_or(Error::AttendanceNotFound {
            attendance_id: absence.id,
        })?;

    Ok(DecisionNotification {
        kind: decision.notification_kind(),
        student_name: student.name,
        student_email: student.email,
        meal_date: slot.date,
        shift: slot.shift,
        reason: decided.reason.clone(),
        admin_note: decided.admin_note.clone(),
    })
}
