/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8010`).
    pub port: u16,
    /// Deployment environment name (default: `local`).
    pub app_env: String,
    /// Postgres connection string.
    pub database_url: String,
    /// Maximum pool size (default: `50`).
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

/// The only store driver this server speaks.
pub const SUPPORTED_DB_DRIVER: &str = "postgres";

/// Invalid or incomplete environment.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("unsupported DB_DRIVER '{0}' (expected 'postgres')")]
    UnsupportedDriver(String),
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT` / `APP_PORT`              | `8010`                  |
    /// | `APP_ENV`                        | `local`                 |
    /// | `DATABASE_URL` / `DB_CONNECTION` | required                |
    /// | `DB_DRIVER`                      | `postgres`              |
    /// | `DB_MAX_CONNECTIONS`             | `50`                    |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    ///
    /// An unset `APP_ENV` means `local`. Any other environment must set the
    /// port and `DB_DRIVER` explicitly.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let first = |keys: &[&str]| keys.iter().copied().find_map(|key| get(key));

        let app_env = get("APP_ENV");
        let is_local = app_env
            .as_deref()
            .map_or(true, |env| env.eq_ignore_ascii_case("local"));
        let port = first(&["PORT", "APP_PORT"]);
        let database_url = first(&["DATABASE_URL", "DB_CONNECTION"]);
        let db_driver = get("DB_DRIVER");

        let mut missing = Vec::new();
        if !is_local {
            if port.is_none() {
                missing.push("APP_PORT");
            }
            if db_driver.is_none() {
                missing.push("DB_DRIVER");
            }
        }
        if database_url.is_none() {
            missing.push("DB_CONNECTION");
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let db_driver = db_driver.unwrap_or_else(|| SUPPORTED_DB_DRIVER.into());
        if !db_driver.eq_ignore_ascii_case(SUPPORTED_DB_DRIVER) {
            return Err(ConfigError::UnsupportedDriver(db_driver));
        }

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_number("PORT", "u16", port, 8010)?,
            app_env: app_env.unwrap_or_else(|| "local".into()),
            database_url: database_url.unwrap_or_default(),
            db_max_connections: parse_number(
                "DB_MAX_CONNECTIONS",
                "u32",
                get("DB_MAX_CONNECTIONS"),
                50,
            )?,
            cors_origins,
            request_timeout_secs: parse_number(
                "REQUEST_TIMEOUT_SECS",
                "u64",
                get("REQUEST_TIMEOUT_SECS"),
                30,
            )?,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
