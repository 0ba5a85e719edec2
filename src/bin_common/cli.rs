//! CLI utilities for the taker binary
//!
//! Resolves the eight positional arguments, falling back to the container
//! environment variables, and turns them into a validated `RunConfig`.

use crate::config::{ConfigError, Credentials, LogLevel, RunConfig};
use paradigm_client::Environment;
use std::time::Duration;

/// One positional argument and its environment fallback
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub env_var: &'static str,
    pub default: Option<&'static str>,
}

pub const ENVIRONMENT: usize = 0;
pub const LOGGING_LEVEL: usize = 1;
pub const ACCOUNT_NAME: usize = 2;
pub const ACCESS_KEY: usize = 3;
pub const SECRET_KEY: usize = 4;
pub const ORDERS_PER_STRATEGY: usize = 5;
pub const LOWER_BOUNDARY: usize = 6;
pub const UPPER_BOUNDARY: usize = 7;

/// Positional arguments, in order
pub const POSITIONAL_ARGS: [ArgSpec; 8] = [
    ArgSpec {
        name: "environment",
        env_var: "PARADIGM_ENVIRONMENT",
        default: Some("TEST"),
    },
    ArgSpec {
        name: "logging level",
        env_var: "LOGGING_LEVEL",
        default: Some("INFO"),
    },
    ArgSpec {
        name: "account name",
        env_var: "PARADIGM_TAKER_ACCOUNT_NAME",
        default: None,
    },
    ArgSpec {
        name: "access key",
        env_var: "PARADIGM_TAKER_ACCESS_KEY",
        default: None,
    },
    ArgSpec {
        name: "secret key",
        env_var: "PARADIGM_TAKER_SECRET_KEY",
        default: None,
    },
    ArgSpec {
        name: "orders-per-strategy",
        env_var: "ORDER_NUMBER_PER_STRATEGY",
        default: None,
    },
    ArgSpec {
        name: "order-submission lower boundary",
        env_var: "ORDER_SUBMISSION_LOWER_BOUNDARY",
        default: None,
    },
    ArgSpec {
        name: "order-submission upper boundary",
        env_var: "ORDER_SUBMISSION_HIGHER_BOUNDARY",
        default: None,
    },
];

/// Seconds to pause between cycles (optional, default 0)
pub const CYCLE_PAUSE_ENV: &str = "ORDER_CYCLE_PAUSE_SECONDS";

/// Set to `false` to skip the WebSocket order channel
pub const WS_ENABLED_ENV: &str = "PARADIGM_WS_ENABLED";

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Read a variable from the process environment
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Value of positional argument `index`: the argument itself, else its
/// environment variable, else its default
pub fn resolve<F>(index: usize, args: &[String], lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let spec = &POSITIONAL_ARGS[index];

    args.get(index)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .or_else(|| lookup(spec.env_var).filter(|v| !v.trim().is_empty()))
        .or_else(|| spec.default.map(str::to_string))
        .ok_or(ConfigError::Missing {
            position: index + 1,
            name: spec.name,
            env_var: spec.env_var,
        })
}

fn parse_count(index: usize, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber {
            name: POSITIONAL_ARGS[index].name,
            value: value.to_string(),
        })
}

fn parse_pause(value: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: CYCLE_PAUSE_ENV,
        reason: format!("'{}' is not a number of seconds", value),
    })?;

    if !secs.is_finite() || secs < 0.0 {
        return Err(ConfigError::InvalidValue {
            name: CYCLE_PAUSE_ENV,
            reason: format!("'{}' must be a non-negative number of seconds", value),
        });
    }

    Ok(Duration::from_secs_f64(secs))
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: WS_ENABLED_ENV,
            reason: format!("'{}' is not a boolean", value),
        }),
    }
}

/// Build a `RunConfig` from positional arguments and an environment lookup
///
/// Pure: performs no I/O beyond calling `lookup`.
pub fn load_run_config<F>(args: &[String], lookup: F) -> Result<RunConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let environment = resolve(ENVIRONMENT, args, &lookup)?
        .parse::<Environment>()
        .map_err(|reason| ConfigError::InvalidValue {
            name: POSITIONAL_ARGS[ENVIRONMENT].name,
            reason,
        })?;

    let log_level = resolve(LOGGING_LEVEL, args, &lookup)?
        .parse::<LogLevel>()
        .map_err(|reason| ConfigError::InvalidValue {
            name: POSITIONAL_ARGS[LOGGING_LEVEL].name,
            reason,
        })?;

    let credentials = Credentials {
        account_name: resolve(ACCOUNT_NAME, args, &lookup)?,
        access_key: resolve(ACCESS_KEY, args, &lookup)?,
        secret_key: resolve(SECRET_KEY, args, &lookup)?,
    };

    let orders_per_strategy = parse_count(
        ORDERS_PER_STRATEGY,
        &resolve(ORDERS_PER_STRATEGY, args, &lookup)?,
    )?;
    let lower = parse_count(LOWER_BOUNDARY, &resolve(LOWER_BOUNDARY, args, &lookup)?)?;
    let upper = parse_count(UPPER_BOUNDARY, &resolve(UPPER_BOUNDARY, args, &lookup)?)?;

    let mut config = RunConfig::new(
        environment,
        log_level,
        credentials,
        orders_per_strategy,
        lower,
        upper,
    )?;

    if let Some(pause) = lookup(CYCLE_PAUSE_ENV).filter(|v| !v.trim().is_empty()) {
        config = config.with_cycle_pause(parse_pause(&pause)?);
    }
    if let Some(flag) = lookup(WS_ENABLED_ENV).filter(|v| !v.trim().is_empty()) {
        config = config.with_ws(parse_flag(&flag)?);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_positional_args() {
        let config = load_run_config(
            &args(&["PROD", "DEBUG", "taker-1", "ak", "c2s=", "3", "1", "4"]),
            no_env,
        )
        .unwrap();

        assert_eq!(config.environment(), Environment::Prod);
        assert_eq!(config.log_level(), LogLevel::Debug);
        assert_eq!(config.account_name(), "taker-1");
        assert_eq!(config.orders_per_strategy(), 3);
        assert_eq!(config.bounds().lower(), 1);
        assert_eq!(config.bounds().upper(), 4);
        assert!(config.ws_enabled());
        assert_eq!(config.cycle_pause(), Duration::ZERO);
    }

    #[test]
    fn test_env_fallback_and_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PARADIGM_TAKER_ACCOUNT_NAME", "taker-env"),
            ("PARADIGM_TAKER_ACCESS_KEY", "ak"),
            ("PARADIGM_TAKER_SECRET_KEY", "c2s="),
            ("ORDER_NUMBER_PER_STRATEGY", "2"),
            ("ORDER_SUBMISSION_LOWER_BOUNDARY", "1"),
            ("ORDER_SUBMISSION_HIGHER_BOUNDARY", "1"),
            ("ORDER_CYCLE_PAUSE_SECONDS", "0.5"),
            ("PARADIGM_WS_ENABLED", "false"),
        ]);
        let config = load_run_config(&[], |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.environment(), Environment::Test);
        assert_eq!(config.log_level(), LogLevel::Info);
        assert_eq!(config.account_name(), "taker-env");
        assert_eq!(config.cycle_pause(), Duration::from_millis(500));
        assert!(!config.ws_enabled());
    }

    #[test]
    fn test_positional_wins_over_env() {
        let config = load_run_config(
            &args(&["TEST", "INFO", "taker-arg", "ak", "c2s=", "1", "1", "1"]),
            |k| (k == "PARADIGM_TAKER_ACCOUNT_NAME").then(|| "taker-env".to_string()),
        )
        .unwrap();
        assert_eq!(config.account_name(), "taker-arg");
    }

    #[test]
    fn test_missing_orders_per_strategy() {
        let result = load_run_config(&args(&["TEST", "INFO", "taker-1", "ak", "c2s="]), no_env);
        assert_eq!(
            result,
            Err(ConfigError::Missing {
                position: 6,
                name: "orders-per-strategy",
                env_var: "ORDER_NUMBER_PER_STRATEGY",
            })
        );
    }

    #[test]
    fn test_non_numeric_orders_per_strategy() {
        let result = load_run_config(
            &args(&["TEST", "INFO", "taker-1", "ak", "c2s=", "many", "1", "2"]),
            no_env,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber { name: "orders-per-strategy", .. })
        ));
    }

    #[test]
    fn test_negative_bound() {
        let result = load_run_config(
            &args(&["TEST", "INFO", "taker-1", "ak", "c2s=", "1", "-1", "2"]),
            no_env,
        );
        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
    }

    #[test]
    fn test_unknown_environment() {
        let result = load_run_config(
            &args(&["STAGING", "INFO", "taker-1", "ak", "c2s=", "1", "1", "2"]),
            no_env,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "environment", .. })
        ));
    }

    #[test]
    fn test_bad_pause() {
        let result = load_run_config(
            &args(&["TEST", "INFO", "taker-1", "ak", "c2s=", "1", "1", "2"]),
            |k| (k == CYCLE_PAUSE_ENV).then(|| "-3".to_string()),
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_error_message_does_not_echo_secret() {
        let result = load_run_config(
            &args(&["TEST", "INFO", "taker-1", "ak", "super-secret", "x", "1", "2"]),
            no_env,
        );
        let message = result.unwrap_err().to_string();
        assert!(!message.contains("super-secret"));
    }
}
