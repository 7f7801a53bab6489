// src/config.rs
use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

/// One hundred years.
const MAX_JWT_TTL_HOURS: i64 = 24 * 365 * 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: String,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub groq_api_key: Option<String>,
    pub frontend_dir: PathBuf,
}

impl Config {
    /// Reads settings from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = parse_or(&var, "HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or(&var, "PORT", 8080u16)?;
        let jwt_ttl_hours = parse_or(&var, "JWT_TTL_HOURS", 72i64)?;
        if !(1..=MAX_JWT_TTL_HOURS).contains(&jwt_ttl_hours) {
            return Err(ConfigError::Invalid { key: "JWT_TTL_HOURS", value: jwt_ttl_hours.to_string() });
        }
        let bcrypt_cost = parse_or(&var, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid { key: "BCRYPT_COST", value: bcrypt_cost.to_string() });
        }

        Ok(Config {
            host,
            port,
            db_path: var("DB_PATH").unwrap_or_else(|| "workout_tracker.db".to_string()),
            jwt_secret: var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_ttl_hours,
            bcrypt_cost,
            groq_api_key: var("GROQ_API_KEY"),
            frontend_dir: var("FRONTEND_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("./frontend")),
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
