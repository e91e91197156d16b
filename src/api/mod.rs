//! API response shaping.
//!
//! Pure transformations from entities (and explicitly-loaded relations) to
//! the structures the HTTP layer serializes. Nothing in this module touches
//! the database: a resource is built from a fully-specified view model, so
//! what appears in a response is decided by the caller, not by what happened
//! to be fetched.

/// Error responses with status, machine code, and structured details
pub mod error;
/// Entity-to-response transformations
pub mod resources;

pub use error::ErrorResponse;
pub use resources::{
    AttendanceResource, AttendanceView, JustificationResource, JustificationView, MealResource,
    MenuResource,
};
