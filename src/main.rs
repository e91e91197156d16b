//! Bootstrap binary: initializes logging, loads settings, and prepares the
//! database schema the HTTP layer runs against.

use dotenvy::dotenv;
use refeitorio::{config, errors::Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application settings (file + environment overrides)
    let settings = config::settings::load()?;
    info!(
        database_url = %settings.database_url,
        default_meal_capacity = settings.default_meal_capacity,
        import_max_file_kb = settings.import_max_file_kb,
        "Loaded application settings."
    );

    // 4. Initialize the database
    let db = config::database::create_connection(&settings.database_url).await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    info!("Refeitorio schema ready.");
    Ok(())
}
