use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::api_client::DEFAULT_API_URL;
use crate::session::DEFAULT_REFRESH_TOKEN_TTL_DAYS;

/// Client configuration loaded from environment variables.
/// Every setting has a default, so an empty environment is valid.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
    pub refresh_token_ttl_days: i64,
    pub login_route: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: env_or("API_URL", DEFAULT_API_URL),
            session_file: match std::env::var("SESSION_FILE") {
                Ok(path) => PathBuf::from(path),
                Err(_) => default_session_file()?,
            },
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30)?,
            refresh_token_ttl_days: parse_env(
                "REFRESH_TOKEN_TTL_DAYS",
                DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            )?,
            login_route: env_or("LOGIN_ROUTE", "/login"),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn default_session_file() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "jobboard")
        .context("could not determine a data directory; set SESSION_FILE")?;
    Ok(dirs.data_dir().join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u64 = parse_env("JOBBOARD_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBBOARD_TEST_BAD_TIMEOUT", "soon");
        let result: Result<u64> = parse_env("JOBBOARD_TEST_BAD_TIMEOUT", 30);
        assert!(result.is_err());
        std::env::remove_var("JOBBOARD_TEST_BAD_TIMEOUT");
    }

    #[test]
    fn test_parse_env_trims_whitespace() {
        std::env::set_var("JOBBOARD_TEST_TTL_DAYS", " 14 ");
        let value: i64 = parse_env("JOBBOARD_TEST_TTL_DAYS", 7).unwrap();
        assert_eq!(value, 14);
        std::env::remove_var("JOBBOARD_TEST_TTL_DAYS");
    }
}
