//! # Client Configuration
//!
//! Loads settings for the schedule editor's network calls from environment
//! variables, with defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `CONFLICT_CHECK_URL`: Full URL of the conflict-check endpoint. When unset, conflict checks are skipped
//! - `CONFLICT_CHECK_TIMEOUT_SECONDS`: Request timeout (default: 5)
//! - `CONFLICT_CHECK_ROOM`: Room number sent with each check
//! - `CONFLICT_CHECK_INSTRUCTOR_ID`: Instructor id sent with each check
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;
use std::time::Duration;

use eyre::{Result, WrapErr};
use tracing::Level;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Conflict-check endpoint, e.g. `http://localhost:5000/classes/api/check-conflicts`
    pub conflict_check_url: Option<String>,

    /// Timeout for a single conflict check, in seconds
    pub request_timeout: u64,

    /// Room sent as `roomNumber` with each check, if any
    pub room_number: Option<String>,

    /// Instructor sent as `instructorId` with each check, if any
    pub instructor_id: Option<i64>,

    /// Logging level for the subscriber (default: INFO)
    pub log_level: Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            conflict_check_url: None,
            request_timeout: DEFAULT_TIMEOUT_SECONDS,
            room_number: None,
            instructor_id: None,
            log_level: Level::INFO,
        }
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl ClientConfig {
    /// Creates a ClientConfig from environment variables
    ///
    /// Unset or blank values fall back to the defaults. An unparseable
    /// timeout falls back to [`DEFAULT_TIMEOUT_SECONDS`] and an unknown
    /// log level to INFO.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `CONFLICT_CHECK_INSTRUCTOR_ID` is set but is not an integer
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rollcall_client::ClientConfig;
    ///
    /// let config = ClientConfig::from_env()?;
    /// if config.conflict_checks_enabled() {
    ///     println!("checking conflicts with a {:?} timeout", config.timeout());
    /// }
    /// # Ok::<(), eyre::Report>(())
    /// ```
    pub fn from_env() -> Result<Self> {
        let conflict_check_url = env::var("CONFLICT_CHECK_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let request_timeout = env::var("CONFLICT_CHECK_TIMEOUT_SECONDS")
            .ok()
            .and_then(|secs| secs.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let room_number = env::var("CONFLICT_CHECK_ROOM")
            .ok()
            .filter(|room| !room.trim().is_empty());

        let instructor_id = env::var("CONFLICT_CHECK_INSTRUCTOR_ID")
            .ok()
            .map(|id| id.trim().parse::<i64>())
            .transpose()
            .wrap_err("Invalid CONFLICT_CHECK_INSTRUCTOR_ID value")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        Ok(Self {
            conflict_check_url,
            request_timeout,
            room_number,
            instructor_id,
            log_level,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn conflict_checks_enabled(&self) -> bool {
        self.conflict_check_url.is_some()
    }
}
