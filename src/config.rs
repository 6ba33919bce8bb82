use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub admin_token: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // DATABASE_URL wins; otherwise the URL is assembled from the
        // individual DB_* variables.
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = std::env::var("DB_HOST").context("DB_HOST")?;
                let port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into());
                let user = std::env::var("DB_USER").context("DB_USER")?;
                let password = std::env::var("DB_PASSWORD").context("DB_PASSWORD")?;
                let name = std::env::var("DB_NAME").context("DB_NAME")?;
                format!("postgres://{user}:{password}@{host}:{port}/{name}?sslmode=disable")
            }
        };
        let admin_token =
            std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "supersecretpassword".into());
        Ok(Self {
            database_url,
            admin_token,
        })
    }
}
