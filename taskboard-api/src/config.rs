/// Server configuration
///
/// All settings come from the environment, with a `.env` file honored in
/// development. Each section loads itself; `Config::from_env` stitches the
/// sections together and is the only entry point callers use.
///
/// | Variable                   | Default   | Notes                              |
/// |----------------------------|-----------|------------------------------------|
/// | `DATABASE_URL`             | required  | PostgreSQL connection string       |
/// | `DATABASE_MAX_CONNECTIONS` | 10        | pool size                          |
/// | `API_HOST`                 | 0.0.0.0   | bind host                          |
/// | `API_PORT`                 | 8080      | bind port                          |
/// | `JWT_SECRET`               | required  | signing key, at least 32 bytes     |
/// | `CORS_ORIGINS`             | *         | comma-separated origin list        |
/// | `ENVIRONMENT`              | —         | "production" tightens CORS + HSTS  |

use serde::{Deserialize, Serialize};
use std::env;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("{} environment variable is required", key))
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    pub api: ApiConfig,

    /// Database settings
    pub database: DatabaseConfig,

    /// Token signing settings
    pub jwt: JwtConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Allowed CORS origins; a lone "*" means permissive (development)
    pub cors_origins: Vec<String>,

    /// Production mode: strict CORS and HSTS
    pub production: bool,
}

impl ApiConfig {
    fn from_env() -> anyhow::Result<Self> {
        let cors_origins = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host: env_or("API_HOST", "0.0.0.0"),
            port: env_or("API_PORT", "8080").parse()?,
            cors_origins,
            production: env::var("ENVIRONMENT")
                .is_ok_and(|e| e.eq_ignore_ascii_case("production")),
        })
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Pool size
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", "10").parse()?,
        })
    }
}

/// Token signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 signing key; generate with `openssl rand -hex 32`
    pub secret: String,
}

impl JwtConfig {
    fn from_env() -> anyhow::Result<Self> {
        let secret = env_required("JWT_SECRET")?;

        // A short HMAC key undermines every token signed with it.
        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        Ok(Self { secret })
    }
}

impl Config {
    /// Loads every section from the environment
    ///
    /// # Errors
    ///
    /// Fails when a required variable is absent, a numeric value does not
    /// parse, or the JWT secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        // Development convenience; absent .env files are fine.
        dotenvy::dotenv().ok();

        Ok(Self {
            api: ApiConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
        })
    }

    /// host:port string for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let api = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 9090,
            cors_origins: vec!["*".to_string()],
            production: false,
        };
        let config = Config {
            api,
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
    }
}
