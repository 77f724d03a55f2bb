//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context, Result};
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_IP_LOOKUP_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Postgres URL for the vote ledger. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: String,
    pub ip_lookup_url: String,
    pub ip_lookup_timeout: Duration,
    /// Start the gallery with the sample images.
    pub seed_gallery: bool,
}

impl Config {
    /// Reads the process environment (after loading `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a valid u32")?
                .max(1),
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let ip_lookup_timeout_secs = match get("IP_LOOKUP_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("IP_LOOKUP_TIMEOUT_SECS must be a valid u64")?,
            None => DEFAULT_IP_LOOKUP_TIMEOUT_SECS,
        };

        let seed_gallery = match get("SEED_GALLERY") {
            Some(v) => parse_bool(&v).ok_or_else(|| anyhow!("SEED_GALLERY must be true or false"))?,
            None => true,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            db_max_connections,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            ip_lookup_url: get("IP_LOOKUP_URL").unwrap_or_else(|| DEFAULT_IP_LOOKUP_URL.to_string()),
            ip_lookup_timeout: Duration::from_secs(ip_lookup_timeout_secs),
            seed_gallery,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.ip_lookup_url, DEFAULT_IP_LOOKUP_URL);
        assert_eq!(config.ip_lookup_timeout, Duration::from_secs(5));
        assert!(config.seed_gallery);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/gallery"),
            ("DB_MAX_CONNECTIONS", "0"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("IP_LOOKUP_TIMEOUT_SECS", "2"),
            ("SEED_GALLERY", "false"),
        ])
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/gallery"));
        assert_eq!(config.db_max_connections, 1);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.ip_lookup_timeout, Duration::from_secs(2));
        assert!(!config.seed_gallery);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(config_from(&[("DB_MAX_CONNECTIONS", "many")]).is_err());
        assert!(config_from(&[("SEED_GALLERY", "maybe")]).is_err());
    }
}
