//! Closed status domains stored as database-backed enums.
//!
//! Every status field in the schema maps to one of these sum types instead of
//! an open string column, so an invalid status cannot be represented once a
//! row is loaded.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meal shift (turno): lunch or dinner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MealShift {
    /// Lunch service (almoço)
    #[sea_orm(string_value = "lunch")]
    Lunch,
    /// Dinner service (jantar)
    #[sea_orm(string_value = "dinner")]
    Dinner,
}

impl MealShift {
    /// Parses an optional request parameter into a shift.
    ///
    /// A missing or empty parameter yields `Ok(None)`; the caller decides
    /// whether that is an error (confirmation requires a shift, some menu
    /// queries do not). Both the English storage values and the Portuguese
    /// names accepted by the public API are recognized.
    pub fn from_param(value: Option<&str>) -> crate::errors::Result<Option<Self>> {
        let Some(raw) = value else { return Ok(None) };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.to_lowercase().as_str() {
            "lunch" | "almoco" | "almoço" => Ok(Some(Self::Lunch)),
            "dinner" | "jantar" => Ok(Some(Self::Dinner)),
            other => Err(crate::errors::Error::Validation {
                message: format!("unknown shift: {other}"),
            }),
        }
    }

    /// Portuguese display name used in API responses and mail bodies.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Lunch => "Almoço",
            Self::Dinner => "Jantar",
        }
    }
}

impl std::fmt::Display for MealShift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lifecycle status of an attendance (presença) record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AttendanceStatus {
    /// Student confirmed they will attend the meal
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Presence validated by an admin at the counter
    #[sea_orm(string_value = "validated")]
    Validated,
    /// Absence covered by an approved justification
    #[sea_orm(string_value = "justified_absence")]
    JustifiedAbsence,
    /// Absence with no approved justification
    #[sea_orm(string_value = "unjustified_absence")]
    UnjustifiedAbsence,
    /// Confirmation cancelled by the student, seat released
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl AttendanceStatus {
    /// Portuguese display name used in API responses.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmada",
            Self::Validated => "Validada",
            Self::JustifiedAbsence => "Falta justificada",
            Self::UnjustifiedAbsence => "Falta não justificada",
            Self::Cancelled => "Cancelada",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Review status of an absence justification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum JustificationStatus {
    /// Awaiting admin review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved - terminal
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected - terminal
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl JustificationStatus {
    /// Portuguese display name used in API responses.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Approved => "Aprovada",
            Self::Rejected => "Rejeitada",
        }
    }
}

impl std::fmt::Display for JustificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
