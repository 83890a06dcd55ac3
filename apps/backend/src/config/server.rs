use std::env;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8300;

/// HTTP server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Run default-state seeding once after the database is ready
    pub seed_on_startup: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_on_startup: false,
        }
    }
}

impl ServerConfig {
    /// `BACKEND_HOST`, `BACKEND_PORT` and `STATES_SEED_ON_STARTUP`
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let seed_on_startup = match env::var("STATES_SEED_ON_STARTUP") {
            Ok(raw) => parse_bool("STATES_SEED_ON_STARTUP", &raw)?,
            Err(_) => false,
        };

        Ok(Self {
            host,
            port,
            seed_on_startup,
        })
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::config(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}
