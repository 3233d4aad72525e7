use sqlx::postgres::PgConnectOptions;
use std::env;

/// Port the HTTP server listens on.
pub const SERVER_PORT: u16 = 3000;

const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Process-wide settings, read once at startup.
///
/// The database credentials and the token signing secret are all required.
/// `SERVER_HOST` and `DATABASE_MAX_CONNECTIONS` are optional.
#[derive(Clone)]
pub struct Config {
    pub db_user: String,
    pub db_host: String,
    pub db_name: String,
    pub db_password: String,
    pub db_port: u16,
    pub jwt_secret: String,
    pub server_host: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let db_port = required("DB_PORT")?
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                var: "DB_PORT",
                reason: e.to_string(),
            })?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| ConfigError::Invalid {
                var: "DATABASE_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET",
                reason: "must not be empty".into(),
            });
        }

        Ok(Self {
            db_user: required("DB_USER")?,
            db_host: required("DB_HOST")?,
            db_name: required("DB_NAME")?,
            db_password: required("DB_PASSWORD")?,
            db_port,
            jwt_secret,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            max_connections,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, SERVER_PORT)
    }
}
