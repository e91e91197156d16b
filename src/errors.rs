//! Unified error types for the cafeteria backend.
//!
//! Business-rule violations form a closed set of named variants, each
//! carrying an HTTP-like status, a stable machine code, and the structured
//! payload the API layer needs to render a useful response. Validation
//! failures are reported through distinct variants and always occur before
//! any state mutation.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::core::weekday::{Weekday, WeekdaySet};
use crate::entities::{JustificationStatus, MealShift};

/// All failure conditions surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No user exists with the given id
    #[error("user {user_id} not found")]
    UserNotFound {
        /// Requested user id
        user_id: i64,
    },

    /// The user exists but is not a scholarship holder
    #[error("user {user_id} is not a scholarship holder")]
    NotScholarshipHolder {
        /// Requested user id
        user_id: i64,
    },

    /// The target date's weekday is not in the user's registered set
    #[error("user {user_id} has no meal right on {attempted}; registered weekdays: {registered}")]
    NoMealRightOnWeekday {
        /// Requested user id
        user_id: i64,
        /// Weekday of the attempted confirmation
        attempted: Weekday,
        /// Weekdays the user is registered for
        registered: WeekdaySet,
    },

    /// No menu published for the given date
    #[error("no menu published for {date}")]
    MenuNotFound {
        /// Requested date
        date: NaiveDate,
    },

    /// A menu already exists for the given date
    #[error("a menu already exists for {date}")]
    MenuAlreadyExists {
        /// Conflicting date
        date: NaiveDate,
    },

    /// No meal slot exists for the given date and shift
    #[error("no meal slot for {date} ({shift})")]
    MealNotFound {
        /// Requested date
        date: NaiveDate,
        /// Requested shift
        shift: MealShift,
    },

    /// Every seat in the slot is already confirmed
    #[error("meal {meal_id} is at capacity ({capacity} seats)")]
    MealAtCapacity {
        /// Full meal slot id
        meal_id: i64,
        /// Configured capacity of the slot
        capacity: i32,
    },

    /// The user already holds a non-cancelled confirmation for this slot.
    /// Idempotent rejection: the payload points at the original record.
    #[error("attendance already confirmed (record {attendance_id} at {confirmed_at})")]
    AlreadyConfirmed {
        /// Id of the existing attendance record
        attendance_id: i64,
        /// Original confirmation timestamp
        confirmed_at: DateTime<Utc>,
    },

    /// No attendance record exists with the given id
    #[error("attendance record {attendance_id} not found")]
    AttendanceNotFound {
        /// Requested attendance id
        attendance_id: i64,
    },

    /// The attendance record is not in a status that permits the operation
    #[error("attendance {attendance_id} cannot transition from its current status")]
    InvalidAttendanceTransition {
        /// Attendance record id
        attendance_id: i64,
    },

    /// No justification exists with the given id
    #[error("justification {justification_id} not found")]
    JustificationNotFound {
        /// Requested justification id
        justification_id: i64,
    },

    /// The attendance record already has a justification
    #[error("attendance {attendance_id} already has a justification")]
    JustificationAlreadyExists {
        /// Attendance record id
        attendance_id: i64,
    },

    /// The justification was already decided and is immutable
    #[error("justification {justification_id} was already decided ({status})")]
    JustificationAlreadyDecided {
        /// Justification id
        justification_id: i64,
        /// Terminal status it holds
        status: JustificationStatus,
        /// When the decision was made
        decided_at: Option<DateTime<Utc>>,
    },

    /// Confirmation was attempted without a shift argument
    #[error("shift parameter is required")]
    ShiftRequired,

    /// Malformed or missing input, reported before any state mutation
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable description of what failed
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of what failed
        message: String,
    },

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// HTTP-like status for this error, used by the API layer.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UserNotFound { .. }
            | Self::MenuNotFound { .. }
            | Self::MealNotFound { .. }
            | Self::AttendanceNotFound { .. }
            | Self::JustificationNotFound { .. } => 404,
            Self::NotScholarshipHolder { .. } | Self::NoMealRightOnWeekday { .. } => 403,
            Self::MenuAlreadyExists { .. }
            | Self::MealAtCapacity { .. }
            | Self::AlreadyConfirmed { .. }
            | Self::InvalidAttendanceTransition { .. }
            | Self::JustificationAlreadyExists { .. }
            | Self::JustificationAlreadyDecided { .. } => 409,
            Self::ShiftRequired | Self::Validation { .. } => 422,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) | Self::EnvVar(_) => 500,
        }
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::NotScholarshipHolder { .. } => "NOT_SCHOLARSHIP_HOLDER",
            Self::NoMealRightOnWeekday { .. } => "NO_MEAL_RIGHT_ON_WEEKDAY",
            Self::MenuNotFound { .. } => "MENU_NOT_FOUND",
            Self::MenuAlreadyExists { .. } => "MENU_ALREADY_EXISTS",
            Self::MealNotFound { .. } => "MEAL_NOT_FOUND",
            Self::MealAtCapacity { .. } => "MEAL_AT_CAPACITY",
            Self::AlreadyConfirmed { .. } => "ALREADY_CONFIRMED",
            Self::AttendanceNotFound { .. } => "ATTENDANCE_NOT_FOUND",
            Self::InvalidAttendanceTransition { .. } => "INVALID_ATTENDANCE_TRANSITION",
            Self::JustificationNotFound { .. } => "JUSTIFICATION_NOT_FOUND",
            Self::JustificationAlreadyExists { .. } => "JUSTIFICATION_ALREADY_EXISTS",
            Self::JustificationAlreadyDecided { .. } => "JUSTIFICATION_ALREADY_DECIDED",
            Self::ShiftRequired => "SHIFT_REQUIRED",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Config { .. } => "CONFIG_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::EnvVar(_) => "ENV_VAR_ERROR",
        }
    }

    /// Whether this is a business-rule violation (as opposed to a validation
    /// failure or infrastructure error).
    #[must_use]
    pub const fn is_business_rule(&self) -> bool {
        matches!(self.status(), 403 | 404 | 409)
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
