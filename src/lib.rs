//! Paradigm FSPD Automated Market Taker
//!
//! QA harness that takes liquidity on Paradigm's future spreads venue:
//! it pulls the available strategies and submits MARKET orders against them
//! in randomized bursts.
//!
//! ## Architecture
//!
//! - **bin_common**: argument resolution and the binary entry point
//! - **config**: immutable `RunConfig`
//! - **session**: the `Session` seam and the live Paradigm session
//! - **taker**: the cycle runner
//! - **paradigm_client**: venue client (re-exported from workspace)

pub use paradigm_client;

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod shutdown;
pub mod taker;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for the taker binary

    pub mod cli;
    pub mod runner;

    pub use cli::{env_lookup, load_run_config, parse_args};
    pub use runner::{execute, exit_code, launch};
}

pub use config::{ConfigError, Credentials, LogLevel, RunConfig, SubmissionBounds};
pub use error::TakerError;
pub use session::{Connector, ParadigmConnector, Session};
pub use shutdown::ShutdownManager;
pub use taker::{CycleReport, OrderOutcome, RunSummary, TakerRunner};
