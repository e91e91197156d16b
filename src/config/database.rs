//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions without manual SQL.

use crate::entities::{Attendance, Justification, Meal, Menu, User, UserWeekday};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions, in dependency order so
/// foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = schema.create_table_from_entity(User);
    let menu_table = schema.create_table_from_entity(Menu);
    let meal_table = schema.create_table_from_entity(Meal);
    let attendance_table = schema.create_table_from_entity(Attendance);
    let justification_table = schema.create_table_from_entity(Justification);
    let user_weekday_table = schema.create_table_from_entity(UserWeekday);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&menu_table)).await?;
    db.execute(builder.build(&meal_table)).await?;
    db.execute(builder.build(&attendance_table)).await?;
    db.execute(builder.build(&justification_table)).await?;
    db.execute(builder.build(&user_weekday_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        attendance::Model as AttendanceModel, justification::Model as JustificationModel,
        meal::Model as MealModel, menu::Model as MenuModel, user::Model as UserModel,
        user_weekday::Model as UserWeekdayModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Every table exists and is queryable
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<MenuModel> = Menu::find().limit(1).all(&db).await?;
        let _: Vec<MealModel> = Meal::find().limit(1).all(&db).await?;
        let _: Vec<AttendanceModel> = Attendance::find().limit(1).all(&db).await?;
        let _: Vec<JustificationModel> = Justification::find().limit(1).all(&db).await?;
        let _: Vec<UserWeekdayModel> = UserWeekday::find().limit(1).all(&db).await?;

        Ok(())
    }
}
