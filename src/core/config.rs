//! Config - Process configuration loaded from the environment

use dotenv::dotenv;
use std::env;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_expiry_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub app_env: String,
}

impl Config {
    /// Loads the configuration from environment variables.
    /// Calls dotenv() first so a local `.env` file is honoured.
    ///
    /// A missing or empty `JWT_SECRET` is an error: the server must not start
    /// without a signing key.
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| "JWT_SECRET must be set to a non-empty value".to_string())?;

        let token_expiry_secs = parse_var("TOKEN_EXPIRY_SECS", 1800u64)
            .map_err(|_| "Invalid TOKEN_EXPIRY_SECS: must be a positive number".to_string())?;
        if token_expiry_secs == 0 {
            return Err("Invalid TOKEN_EXPIRY_SECS: must be greater than zero".to_string());
        }

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = parse_var("SERVER_PORT", 3005u16).map_err(|_| {
            "Invalid SERVER_PORT: must be a number between 0-65535".to_string()
        })?;

        let max_connections = parse_var("MAX_DB_CONNECTIONS", 10u32)
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let acquire_timeout_secs = parse_var("DB_ACQUIRE_TIMEOUT_SECS", 5u64).map_err(|_| {
            "Invalid DB_ACQUIRE_TIMEOUT_SECS: must be a positive number".to_string()
        })?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            token_expiry_secs,
            server_host,
            server_port,
            max_connections,
            acquire_timeout_secs,
            app_env,
        })
    }

    pub fn token_expiry(&self) -> Duration {
        Duration::from_secs(self.token_expiry_secs)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Logs the configuration, hiding secrets
    pub fn print_info(&self) {
        info!("Environment: {}", self.app_env);
        info!("Server address: {}:{}", self.server_host, self.server_port);
        info!("Database: {}", Self::mask_url(&self.database_url));
        info!("Max DB connections: {}", self.max_connections);
        info!("DB acquire timeout: {}s", self.acquire_timeout_secs);
        info!("Token expiry: {}s", self.token_expiry_secs);
        info!("JWT secret: configured");
    }

    /// Masks the credentials of the database URL for logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, T::Err> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>(),
        Err(_) => Ok(default),
    }
}
