//! Justification entity - A student-submitted explanation for an absence.
//!
//! Once decided (approved or rejected) the record is immutable; the decision
//! timestamp and admin note are filled exactly once by
//! `core::justification::decide_justification`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::JustificationStatus;

/// Justification database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "justifications")]
pub struct Model {
    /// Unique identifier for the justification
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Absence attendance record this justification covers
    pub attendance_id: i64,
    /// Student-supplied reason text
    pub reason: String,
    /// Review status: pending until an admin decides
    pub status: JustificationStatus,
    /// Optional note left by the deciding admin
    pub admin_note: Option<String>,
    /// When the decision was made, None while pending
    pub decided_at: Option<DateTimeUtc>,
    /// When the student submitted the justification
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Justification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each justification belongs to one attendance record
    #[sea_orm(
        belongs_to = "super::attendance::Entity",
        from = "Column::AttendanceId",
        to = "super::attendance::Column::Id"
    )]
    Attendance,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
