//! Binary runner utilities
//!
//! Wires configuration, logging, the venue session and the taker runner
//! together, and maps the outcome to a process exit code.

use crate::bin_common::cli::load_run_config;
use crate::config::RunConfig;
use crate::error::{Result, TakerError, EXIT_OK};
use crate::logging::init_tracing;
use crate::session::{Connector, Session};
use crate::shutdown::ShutdownManager;
use crate::taker::{RunSummary, TakerRunner};
use rand::Rng;
use tracing::{error, info};

pub const BINARY_NAME: &str = "Paradigm FSPD Auto Taker";

/// Print startup banner
pub fn print_banner(config: &RunConfig) {
    info!("========================================");
    info!("Starting {}", BINARY_NAME);
    info!("   Environment: {}", config.environment());
    info!("   Account:     {}", config.account_name());
    info!(
        "   Cycles:      {} x {}..={} orders",
        config.orders_per_strategy(),
        config.bounds().lower(),
        config.bounds().upper()
    );
    info!("========================================");
}

/// Print shutdown banner
pub fn print_shutdown(summary: &RunSummary) {
    info!("========================================");
    if summary.interrupted {
        info!("{} interrupted", BINARY_NAME);
    } else {
        info!("{} finished", BINARY_NAME);
    }
    info!(
        "   {} cycles, {} orders submitted, {} accepted, {} failed",
        summary.cycles, summary.submitted, summary.accepted, summary.failed
    );
    info!("========================================");
}

/// Connect, run every cycle, and tear the session down
///
/// The session is closed and the totals printed whether the run succeeds
/// or fails.
pub async fn execute<C, R>(
    config: &RunConfig,
    connector: &C,
    rng: R,
    shutdown: ShutdownManager,
) -> Result<RunSummary>
where
    C: Connector,
    R: Rng,
{
    let mut session = connector.connect(config).await?;

    let mut runner = TakerRunner::new(config, &mut session, rng, shutdown);
    let result = runner.run().await;
    let summary = runner.summary();

    session.close().await;
    print_shutdown(&summary);

    let summary = result?;
    if summary.interrupted {
        return Err(TakerError::Interrupted);
    }
    Ok(summary)
}

/// Parse the configuration, initialise logging, and run
///
/// Configuration errors are returned before the connector is touched.
pub async fn launch<C, R, F>(
    args: &[String],
    lookup: F,
    connector: &C,
    rng: R,
    shutdown: ShutdownManager,
) -> Result<RunSummary>
where
    C: Connector,
    R: Rng,
    F: Fn(&str) -> Option<String>,
{
    let config = load_run_config(args, lookup)?;

    init_tracing(config.log_level());
    print_banner(&config);

    execute(&config, connector, rng, shutdown).await
}

/// Process exit code for a run outcome, logging the failure if any
pub fn exit_code(result: &Result<RunSummary>) -> i32 {
    match result {
        Ok(_) => EXIT_OK,
        // Logging is not initialised until the configuration parses
        Err(e @ TakerError::Configuration(_)) => {
            eprintln!("{}", e);
            e.exit_code()
        }
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    }
}
