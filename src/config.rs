use std::str::FromStr;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => anyhow::bail!("unknown store backend {other:?}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Rewrite dates of demo-owner records on read.
    pub date_shift: bool,
    /// Insert the demo records on first startup.
    pub seed: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub demo: DemoConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(v) => v.parse::<StoreBackend>().context("STORE_BACKEND")?,
            Err(_) => StoreBackend::Postgres,
        };
        let database_url = std::env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORE_BACKEND=postgres");
        }

        let demo = DemoConfig {
            date_shift: env_flag("DEMO_DATE_SHIFT", true)?,
            seed: env_flag("SEED_DEMO_DATA", true)?,
        };

        Ok(Self {
            store_backend,
            database_url,
            max_connections: env_parse("DB_MAX_CONNECTIONS", 10)?,
            demo,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("APP_PORT", 5001)?,
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
            demo: DemoConfig {
                date_shift: true,
                seed: false,
            },
            host: "127.0.0.1".into(),
            port: 0,
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key}: {e}")),
        Err(_) => Ok(default),
    }
}

fn env_flag(key: &str, default: bool) -> anyhow::Result<bool> {
    match std::env::var(key) {
        Ok(v) => parse_flag(&v).with_context(|| format!("{key} must be a boolean, got {v:?}")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_backend_names() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" Memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn parses_flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
