use crate::error::ServiceError;
use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connection settings read from the environment (and `.env`, if present)
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub sqlx_logging: bool,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok();

        let database_url = dotenvy::var("DATABASE_URL")
            .map_err(|_| ServiceError::MissingConfig("DATABASE_URL"))?;
        let sqlx_logging = dotenvy::var("DATABASE_LOG_QUERIES")
            .is_ok_and(|value| matches!(value.as_str(), "1" | "true"));

        Ok(Self {
            database_url,
            sqlx_logging,
        })
    }
}

/// Creates a database connection
pub async fn create_connection(config: &DbConfig) -> Result<DatabaseConnection, ServiceError> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(config.sqlx_logging);

    let db = Database::connect(options).await?;
    info!("Connected to database");
    Ok(db)
}
