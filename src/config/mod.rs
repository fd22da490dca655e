use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "sqlite:zoo.db?mode=rwc";

/// Runtime configuration. One instance is the single source of truth for
/// the port: the server binds it and the order client derives its base URL
/// from it, so the two sides can never disagree.
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT", DEFAULT_PORT),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        }
    }

    /// Base URL the order-submission client targets.
    pub fn api_base_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Invalid {key} value '{raw}': {e}, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_base_url_follows_the_configured_port() {
        let config = Config {
            port: 4000,
            database_url: DEFAULT_DATABASE_URL.to_string(),
        };
        assert_eq!(config.api_base_url(), "http://localhost:4000");
    }

    #[test]
    fn test_defaults_without_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("DATABASE_URL");
        let config = Config::from_env();
        assert_eq!(config.port, 3001);
        assert_eq!(config.database_url, "sqlite:zoo.db?mode=rwc");
    }
}
