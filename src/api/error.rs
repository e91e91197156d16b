//! Error response shaping.
//!
//! Turns a domain [`Error`] into the structured failure payload the API
//! returns: an HTTP-like status, a stable machine code, a human-readable
//! message, and variant-specific details under the Portuguese field names
//! the API consumers expect (e.g. `dias_cadastrados`).

use crate::api::resources::{format_date, format_datetime};
use crate::errors::Error;
use serde::Serialize;

/// Structured failure payload for API consumers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP-like status code
    pub status: u16,
    /// Stable machine-readable code, e.g. `NO_MEAL_RIGHT_ON_WEEKDAY`
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
    /// Variant-specific structured payload, when the error carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// Machine-readable detail fields; only the ones relevant to the error are
/// present in the serialized output.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ErrorDetails {
    /// User the rule was evaluated for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<i64>,
    /// Display name of the weekday the confirmation was attempted on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_tentado: Option<String>,
    /// Display names of the user's registered weekdays, comma-separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias_cadastrados: Option<String>,
    /// Existing attendance record referenced by an idempotent rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenca_id: Option<i64>,
    /// Original confirmation timestamp, `dd/mm/yyyy HH:MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmado_em: Option<String>,
    /// Meal slot involved in a capacity rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refeicao_id: Option<i64>,
    /// Capacity of the full slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacidade: Option<i32>,
    /// Date a menu/meal lookup failed for, `dd/mm/yyyy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Shift display name of a failed meal lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turno: Option<String>,
    /// Justification involved in a decision conflict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justificativa_id: Option<i64>,
    /// Terminal status of an already-decided justification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situacao: Option<String>,
    /// Decision timestamp of an already-decided justification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decidido_em: Option<String>,
}

impl ErrorResponse {
    /// Shapes a domain error into the API failure payload.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        Self {
            status: error.status(),
            code: error.code(),
            message: error.to_string(),
            details: details_for(error),
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self::from_error(error)
    }
}

fn details_for(error: &Error) -> Option<ErrorDetails> {
    match error {
        Error::NoMealRightOnWeekday {
            user_id,
            attempted,
            registered,
        } => Some(ErrorDetails {
            usuario_id: Some(*user_id),
            dia_tentado: Some(attempted.display_name().to_string()),
            dias_cadastrados: Some(registered.to_string()),
            ..Default::default()
        }),
        Error::AlreadyConfirmed {
            attendance_id,
            confirmed_at,
        } => Some(ErrorDetails {
            presenca_id: Some(*attendance_id),
            confirmado_em: Some(format_datetime(*confirmed_at)),
            ..Default::default()
        }),
        Error::MealAtCapacity { meal_id, capacity } => Some(ErrorDetails {
            refeicao_id: Some(*meal_id),
            capacidade: Some(*capacity),
            ..Default::default()
        }),
        Error::MealNotFound { date, shift } => Some(ErrorDetails {
            data: Some(format_date(*date)),
            turno: Some(shift.display_name().to_string()),
            ..Default::default()
        }),
        Error::MenuNotFound { date } | Error::MenuAlreadyExists { date } => Some(ErrorDetails {
            data: Some(format_date(*date)),
            ..Default::default()
        }),
        Error::JustificationAlreadyDecided {
            justification_id,
            status,
            decided_at,
        } => Some(ErrorDetails {
            justificativa_id: Some(*justification_id),
            situacao: Some(status.display_name().to_string()),
            decidido_em: decided_at.map(format_datetime),
            ..Default::default()
        }),
        Error::UserNotFound { user_id } | Error::NotScholarshipHolder { user_id } => {
            Some(ErrorDetails {
                usuario_id: Some(*user_id),
                ..Default::default()
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::weekday::{Weekday, WeekdaySet};
    use chrono::TimeZone as _;
    use chrono::Utc;

    #[test]
    fn test_no_meal_right_renders_registered_days() {
        let error = Error::NoMealRightOnWeekday {
            user_id: 7,
            attempted: Weekday::new(2).unwrap(),
            registered: WeekdaySet::from_numbers(&[1, 3, 5]).unwrap(),
        };

        let response = ErrorResponse::from_error(&error);
        assert_eq!(response.status, 403);
        assert_eq!(response.code, "NO_MEAL_RIGHT_ON_WEEKDAY");

        let details = response.details.unwrap();
        assert_eq!(details.dia_tentado, Some("Terça".to_string()));
        assert_eq!(
            details.dias_cadastrados,
            Some("Segunda, Quarta, Sexta".to_string())
        );

        // Only the relevant keys appear in the serialized payload
        let json = serde_json::to_value(&details).unwrap();
        assert!(json.get("presenca_id").is_none());
        assert_eq!(json["dias_cadastrados"], "Segunda, Quarta, Sexta");
    }

    #[test]
    fn test_already_confirmed_references_original() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 11, 30, 0).unwrap();
        let error = Error::AlreadyConfirmed {
            attendance_id: 42,
            confirmed_at: at,
        };

        let response = ErrorResponse::from_error(&error);
        assert_eq!(response.status, 409);
        let details = response.details.unwrap();
        assert_eq!(details.presenca_id, Some(42));
        assert_eq!(details.confirmado_em, Some("05/03/2024 11:30".to_string()));
    }

    #[test]
    fn test_shift_required_has_no_details() {
        let response = ErrorResponse::from_error(&Error::ShiftRequired);
        assert_eq!(response.status, 422);
        assert_eq!(response.code, "SHIFT_REQUIRED");
        assert!(response.details.is_none());
    }
}
