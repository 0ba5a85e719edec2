//! Paradigm FSPD Automated Market Taker
//!
//! Usage:
//!   auto_taker <environment> <logging_level> <account_name> <access_key> \
//!              <secret_key> <orders_per_strategy> <lower_boundary> <upper_boundary>
//!
//! Any argument left out falls back to its environment variable
//! (PARADIGM_ENVIRONMENT, LOGGING_LEVEL, PARADIGM_TAKER_ACCOUNT_NAME,
//! PARADIGM_TAKER_ACCESS_KEY, PARADIGM_TAKER_SECRET_KEY,
//! ORDER_NUMBER_PER_STRATEGY, ORDER_SUBMISSION_LOWER_BOUNDARY,
//! ORDER_SUBMISSION_HIGHER_BOUNDARY). A `.env` file is loaded if present.
//!
//! Exit codes: 0 success, 1 configuration, 2 authentication, 3 network,
//! 4 venue protocol, 130 interrupted.

use anyhow::{Context, Result};
use paradigm_auto_taker::bin_common::{env_lookup, exit_code, launch, parse_args};
use paradigm_auto_taker::{ParadigmConnector, ShutdownManager};

fn run() -> Result<i32> {
    dotenv::dotenv().ok();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    let args = parse_args();

    let code = runtime.block_on(async {
        let shutdown = ShutdownManager::new();
        shutdown.spawn_signal_handler();

        let result = launch(
            &args,
            env_lookup,
            &ParadigmConnector,
            rand::thread_rng(),
            shutdown,
        )
        .await;

        exit_code(&result)
    });

    Ok(code)
}

fn main() {
    let code = run().unwrap_or_else(|e| {
        eprintln!("{:#}", e);
        1
    });
    std::process::exit(code);
}
