//! Server configuration loaded from environment variables.
//!
//! # Variables
//! - `TASKLIST_DB_PATH`: SQLite file path, or `:memory:` (default `tasklist.sqlite3`).
//! - `HOST`: listen address (default `0.0.0.0`).
//! - `PORT`: listen port (default `5000`).
//! - `TASKLIST_CORS_ORIGIN`: allowed client origin; unset or `*` allows any.
//! - `TASKLIST_LOG_LEVEL`: `trace|debug|info|warn|error` (default by build mode).
//! - `TASKLIST_LOG_DIR`: absolute log directory (default `<cwd>/logs`).

use axum::http::HeaderValue;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "tasklist.sqlite3";
pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Origin policy applied to cross-origin requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Exact(HeaderValue),
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidHost(String),
    InvalidCorsOrigin(String),
    InvalidLogLevel(String),
    RelativeLogDir(String),
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort(value) => write!(f, "PORT must be a number in 1..=65535, got `{value}`"),
            Self::InvalidHost(value) => write!(f, "HOST must be an IP address, got `{value}`"),
            Self::InvalidCorsOrigin(value) => {
                write!(f, "TASKLIST_CORS_ORIGIN is not a valid header value: `{value}`")
            }
            Self::InvalidLogLevel(message) => write!(f, "TASKLIST_LOG_LEVEL: {message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "TASKLIST_LOG_DIR must be an absolute path, got `{value}`")
            }
            Self::CurrentDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: CorsOrigin,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or(ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let host = match get("HOST") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(value))?,
            None => DEFAULT_HOST,
        };

        let cors_origin = match get("TASKLIST_CORS_ORIGIN") {
            None => CorsOrigin::Any,
            Some(value) if value == "*" => CorsOrigin::Any,
            Some(value) => HeaderValue::from_str(&value)
                .map(CorsOrigin::Exact)
                .map_err(|_| ConfigError::InvalidCorsOrigin(value))?,
        };

        let log_level = match get("TASKLIST_LOG_LEVEL") {
            Some(value) => tasklist_core::normalize_level(&value).map_err(ConfigError::InvalidLogLevel)?,
            None => tasklist_core::default_log_level(),
        };

        let log_dir = match get("TASKLIST_LOG_DIR") {
            Some(value) => {
                let path = PathBuf::from(&value);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(value));
                }
                path
            }
            None => std::env::current_dir()
                .map_err(ConfigError::CurrentDir)?
                .join("logs"),
        };

        Ok(Self {
            db_path: get("TASKLIST_DB_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from),
            host,
            port,
            cors_origin,
            log_level: log_level.to_string(),
            log_dir,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
