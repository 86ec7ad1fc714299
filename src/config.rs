use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, Result, anyhow};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Reads configuration from the environment (after `.env` has been loaded).
pub fn load() -> Result<Config> {
    Ok(Config {
        server: ServerConfig {
            host: try_load("SERVER_HOST", "0.0.0.0")?,
            port: try_load("SERVER_PORT", "3000")?,
        },
        database: DatabaseConfig {
            url: required("DATABASE_URL")?,
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", "10")?,
        },
    })
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Environment variable {key} must be set"))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_unset_keys() {
        let port: u16 = try_load("RESTAURANT_ORDERSERVICE_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn unparsable_defaults_are_errors() {
        let port: Result<u16> = try_load("RESTAURANT_ORDERSERVICE_TEST_UNSET_PORT", "not-a-port");
        assert!(port.is_err());
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".into(),
            port: 8080,
        };
        assert_eq!(server.address(), "127.0.0.1:8080");
    }
}
