//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attendance;
pub mod enums;
pub mod justification;
pub mod meal;
pub mod menu;
pub mod user;
pub mod user_weekday;

// Re-export specific types to avoid conflicts
pub use attendance::{Column as AttendanceColumn, Entity as Attendance, Model as AttendanceModel};
pub use enums::{AttendanceStatus, JustificationStatus, MealShift};
pub use justification::{
    Column as JustificationColumn, Entity as Justification, Model as JustificationModel,
};
pub use meal::{Column as MealColumn, Entity as Meal, Model as MealModel};
pub use menu::{Column as MenuColumn, Entity as Menu, Model as MenuModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use user_weekday::{
    Column as UserWeekdayColumn, Entity as UserWeekday, Model as UserWeekdayModel,
};
