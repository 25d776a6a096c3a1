//! Runtime configuration.
//!
//! A small TOML file:
//!
//! ```toml
//! database_url = "sqlite://fleet.db"
//! listen = "0.0.0.0:8080"
//! timezone = "Europe/Zagreb"
//! ```
//!
//! `listen` and `timezone` are optional. `DATABASE_URL` in the environment
//! overrides `database_url`; without a file the environment alone is used.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, bail};
use chrono_tz::Tz;
use serde::Deserialize;
use shared_utils::env::{get_env_var, get_env_var_opt};

/// Environment variable overriding [`FleetConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FleetConfig {
    /// SQLite path or `sqlite:` URL.
    #[serde(default)]
    pub database_url: String,
    /// HTTP listen address.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// IANA zone used to compute "today" for upcoming trips.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl FleetConfig {
    /// Configuration from the environment only.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = get_env_var(DATABASE_URL_ENV)?;
        let cfg = FleetConfig {
            database_url,
            listen: default_listen(),
            timezone: default_timezone(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parsed time zone.
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {e}", self.timezone))
    }

    fn apply_env(&mut self) {
        if let Some(url) = get_env_var_opt(DATABASE_URL_ENV) {
            tracing::debug!("database_url overridden from {DATABASE_URL_ENV}");
            self.database_url = url;
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.database_url.trim().is_empty() {
            bail!("database_url is not set (config file or {DATABASE_URL_ENV})");
        }
        self.timezone()?;
        Ok(())
    }
}

/// Parse a TOML string, apply the environment override, and validate.
pub fn load_config_str(s: &str) -> anyhow::Result<FleetConfig> {
    let mut cfg: FleetConfig = toml::from_str(s).context("parse fleet config TOML")?;
    cfg.apply_env();
    cfg.validate()?;
    Ok(cfg)
}

/// Read and parse a config file. See [`load_config_str`].
pub fn load_config_path<P: AsRef<Path>>(path: P) -> anyhow::Result<FleetConfig> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    load_config_str(&s).with_context(|| format!("load config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that would observe DATABASE_URL only run when it is unset.
    fn env_clear() -> bool {
        get_env_var_opt(DATABASE_URL_ENV).is_none()
    }

    #[test]
    fn defaults_apply() {
        if !env_clear() {
            return;
        }
        let cfg = load_config_str(r#"database_url = "sqlite://fleet.db""#).unwrap();
        assert_eq!(cfg.listen, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::UTC);
        assert_eq!(cfg.database_url, "sqlite://fleet.db");
    }

    #[test]
    fn full_file_parses() {
        if !env_clear() {
            return;
        }
        let cfg = load_config_str(
            r#"
            database_url = "/var/lib/fleet/fleet.db"
            listen = "0.0.0.0:9000"
            timezone = "Europe/Zagreb"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.listen.port(), 9000);
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::Europe::Zagreb);
    }

    #[test]
    fn rejects_bad_timezone_and_unknown_keys() {
        let err = load_config_str(
            r#"
            database_url = "fleet.db"
            timezone = "Mars/Olympus"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid timezone"));

        let err = load_config_str(
            r#"
            database_url = "fleet.db"
            pool_size = 4
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown field"));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        if !env_clear() {
            return;
        }
        let err = load_config_str(r#"listen = "127.0.0.1:1""#).unwrap_err();
        assert!(err.to_string().contains("database_url is not set"));
    }
}
