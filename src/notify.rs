//! Decision notifications queued to the outbound mail channel.
//!
//! The channel itself (SMTP) is an external collaborator; this module builds
//! the subject and templated body for a justification decision and hands the
//! message to a [`Notifier`]. Delivery is fire-and-forget: failures are
//! logged and never escalate to the request that triggered them.

use crate::entities::MealShift;
use crate::errors::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

/// The kind of decision being communicated to the student.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    /// The justification was approved
    JustificationApproved,
    /// The justification was rejected
    JustificationRejected,
}

impl NotificationKind {
    /// Subject prefix for this kind of notification.
    #[must_use]
    pub const fn subject_prefix(self) -> &'static str {
        match self {
            Self::JustificationApproved => "Justificativa aprovada",
            Self::JustificationRejected => "Justificativa rejeitada",
        }
    }
}

/// Everything needed to render a justification-decision message.
#[derive(Debug, Clone)]
pub struct DecisionNotification {
    /// The decision outcome
    pub kind: NotificationKind,
    /// Student display name
    pub student_name: String,
    /// Student e-mail address
    pub student_email: String,
    /// Date of the meal the absence refers to
    pub meal_date: NaiveDate,
    /// Shift of the meal the absence refers to
    pub shift: MealShift,
    /// Reason text the student submitted
    pub reason: String,
    /// Note left by the deciding admin, if any
    pub admin_note: Option<String>,
}

impl DecisionNotification {
    /// Subject line built from the decision outcome,
    /// e.g. "Justificativa aprovada - Almoço de 05/03/2024".
    #[must_use]
    pub fn subject(&self) -> String {
        format!(
            "{} - {} de {}",
            self.kind.subject_prefix(),
            self.shift.display_name(),
            self.meal_date.format("%d/%m/%Y")
        )
    }

    /// Plain-text body summarizing the decision and any admin note.
    #[must_use]
    pub fn body(&self) -> String {
        use std::fmt::Write;

        let outcome = match self.kind {
            NotificationKind::JustificationApproved => "aprovada",
            NotificationKind::JustificationRejected => "rejeitada",
        };

        let mut body = format!(
            "Olá, {},\n\nSua justificativa de ausência para o {} de {} foi {}.\n\nMotivo informado: {}\n",
            self.student_name,
            self.shift.display_name(),
            self.meal_date.format("%d/%m/%Y"),
            outcome,
            self.reason,
        );

        if let Some(note) = &self.admin_note {
            // write! to a String is infallible
            let _ = write!(body, "\nObservação da administração: {note}\n");
        }

        body.push_str("\nRestaurante Institucional\n");
        body
    }
}

/// Capability to deliver a decision notification to a student.
///
/// Implementations wrap whatever channel the deployment uses; the crate ships
/// [`LogNotifier`] and the HTTP layer can plug an SMTP-backed one in.
pub trait Notifier: Clone + Send + Sync + 'static {
    /// Delivers one notification.
    fn send(
        &self,
        notification: DecisionNotification,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Default notifier: emits the message through `tracing` instead of a real
/// channel. Useful for development and as the fallback when no mail channel
/// is configured.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn send(&self, notification: DecisionNotification) -> Result<()> {
        info!(
            to = %notification.student_email,
            subject = %notification.subject(),
            "decision notification (log channel)"
        );
        Ok(())
    }
}

/// Queues a notification for asynchronous delivery.
///
/// The send happens on a spawned task; a delivery failure is logged with
/// `warn` and never propagated to the caller.
pub fn queue_decision_notification<N: Notifier>(
    notifier: &N,
    notification: DecisionNotification,
) -> tokio::task::JoinHandle<()> {
    let notifier = notifier.clone();
    tokio::spawn(async move {
        let subject = notification.subject();
        let recipient = notification.student_email.clone();
        if let Err(err) = notifier.send(notification).await {
            warn!(
                error = %err,
                to = %recipient,
                subject = %subject,
                "failed to deliver decision notification"
            );
        }
    })
}
