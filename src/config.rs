//! Run configuration
//!
//! `RunConfig` is built once at startup from the positional arguments (or
//! their environment fallbacks) and never mutated afterwards.

use paradigm_client::Environment;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing argument {position} ({name}); pass it positionally or set {env_var}")]
    Missing {
        position: usize,
        name: &'static str,
        env_var: &'static str,
    },

    #[error("Invalid {name}: '{value}' is not a positive integer")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("Invalid submission bounds: lower ({lower}) must be >= 1 and <= upper ({upper})")]
    InvalidBounds { lower: u32, upper: u32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Logging verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            other => Err(format!(
                "unknown level '{}', expected DEBUG, INFO, WARN or ERROR",
                other
            )),
        }
    }
}

/// Venue credentials
///
/// The access and secret keys never show up in `Debug` output.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub account_name: String,
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_name", &self.account_name)
            .field("access_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Inclusive range of orders submitted per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionBounds {
    lower: u32,
    upper: u32,
}

impl SubmissionBounds {
    pub fn new(lower: u32, upper: u32) -> Result<Self> {
        if lower < 1 || upper < lower {
            return Err(ConfigError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }

    pub fn contains(&self, count: u32) -> bool {
        (self.lower..=self.upper).contains(&count)
    }

    /// Uniform draw in `[lower, upper]`
    pub fn draw<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.lower..=self.upper)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    environment: Environment,
    log_level: LogLevel,
    credentials: Credentials,
    orders_per_strategy: u32,
    bounds: SubmissionBounds,
    cycle_pause: Duration,
    ws_enabled: bool,
}

impl RunConfig {
    pub fn new(
        environment: Environment,
        log_level: LogLevel,
        credentials: Credentials,
        orders_per_strategy: u32,
        lower: u32,
        upper: u32,
    ) -> Result<Self> {
        if orders_per_strategy < 1 {
            return Err(ConfigError::InvalidNumber {
                name: "orders-per-strategy",
                value: orders_per_strategy.to_string(),
            });
        }
        for (name, value) in [
            ("account name", &credentials.account_name),
            ("access key", &credentials.access_key),
            ("secret key", &credentials.secret_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(Self {
            environment,
            log_level,
            credentials,
            orders_per_strategy,
            bounds: SubmissionBounds::new(lower, upper)?,
            cycle_pause: Duration::ZERO,
            ws_enabled: true,
        })
    }

    /// Pause between cycles
    pub fn with_cycle_pause(mut self, pause: Duration) -> Self {
        self.cycle_pause = pause;
        self
    }

    /// Enable or disable the WebSocket order channel
    pub fn with_ws(mut self, enabled: bool) -> Self {
        self.ws_enabled = enabled;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn account_name(&self) -> &str {
        &self.credentials.account_name
    }

    pub fn orders_per_strategy(&self) -> u32 {
        self.orders_per_strategy
    }

    pub fn bounds(&self) -> SubmissionBounds {
        self.bounds
    }

    pub fn cycle_pause(&self) -> Duration {
        self.cycle_pause
    }

    pub fn ws_enabled(&self) -> bool {
        self.ws_enabled
    }
}
