//! Core business logic module.
//!
//! Framework-agnostic operations over the cafeteria entities: menu
//! publishing, attendance confirmation, justification review, and the
//! registered-weekday rules behind them. Everything here takes a database
//! connection and returns `Result`; the HTTP layer stays thin.

/// Attendance confirmation, validation, and cancellation
pub mod attendance;
/// Justification submission and admin decisions
pub mod justification;
/// Menu publishing and date-scoped queries
pub mod menu;
/// Registered-weekday rules and display helpers
pub mod weekday;
