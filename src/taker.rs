//! Taker runner
//!
//! Pulls the available strategies, builds one MARKET order per strategy and
//! side, then runs `orders-per-strategy` cycles. Each cycle draws a count in
//! the submission bounds and submits that many orders, walking the order
//! list round-robin across cycles.

use crate::config::RunConfig;
use crate::error::{Result, TakerError};
use crate::session::Session;
use crate::shutdown::ShutdownManager;
use paradigm_client::{OrderRequest, Side, Strategy};
use rand::Rng;
use tracing::{debug, info, warn};

/// Order payloads cycled through by the runner
#[derive(Debug, Clone)]
pub struct OrderBook {
    orders: Vec<OrderRequest>,
    cursor: usize,
}

impl OrderBook {
    /// One MARKET order per strategy per side, BUY first
    pub fn from_strategies(account_name: &str, strategies: &[Strategy]) -> Self {
        let orders = strategies
            .iter()
            .flat_map(|strategy| {
                Side::ALL
                    .iter()
                    .map(move |side| OrderRequest::market(account_name, strategy, *side))
            })
            .collect();

        Self { orders, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Next payload, wrapping around at the end
    pub fn next_order(&mut self) -> Option<&OrderRequest> {
        if self.orders.is_empty() {
            return None;
        }
        let index = self.cursor % self.orders.len();
        self.cursor = (index + 1) % self.orders.len();
        self.orders.get(index)
    }
}

/// Result of one order submission
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    Accepted { order_id: String },
    Failed { class: &'static str },
}

/// Tally of one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle: u32,
    pub drawn: u32,
    pub submitted: u64,
    pub accepted: u64,
    pub failed: u64,
}

impl CycleReport {
    pub fn new(cycle: u32, drawn: u32) -> Self {
        Self {
            cycle,
            drawn,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: &OrderOutcome) {
        self.submitted += 1;
        match outcome {
            OrderOutcome::Accepted { .. } => self.accepted += 1,
            OrderOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Running totals for the whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u32,
    pub drawn: u64,
    pub submitted: u64,
    pub accepted: u64,
    pub failed: u64,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn add(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.drawn += u64::from(report.drawn);
        self.submitted += report.submitted;
        self.accepted += report.accepted;
        self.failed += report.failed;
    }
}

pub struct TakerRunner<'a, S: Session, R: Rng> {
    config: &'a RunConfig,
    session: &'a mut S,
    rng: R,
    shutdown: ShutdownManager,
    summary: RunSummary,
}

impl<'a, S: Session, R: Rng> TakerRunner<'a, S, R> {
    pub fn new(config: &'a RunConfig, session: &'a mut S, rng: R, shutdown: ShutdownManager) -> Self {
        Self {
            config,
            session,
            rng,
            shutdown,
            summary: RunSummary::default(),
        }
    }

    /// Totals so far, including the cycle a fatal error cut short
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Run every cycle
    ///
    /// Per-order network and protocol errors are logged and counted; an
    /// authentication error on any order ends the run.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let strategies = self.session.strategies().await?;
        let mut book = OrderBook::from_strategies(self.config.account_name(), &strategies);

        if book.is_empty() {
            return Err(TakerError::VenueProtocol(
                "venue returned no strategies to take".to_string(),
            ));
        }

        info!(
            "{} strategies, {} order payloads, {} cycles of {}..={} orders",
            strategies.len(),
            book.len(),
            self.config.orders_per_strategy(),
            self.config.bounds().lower(),
            self.config.bounds().upper()
        );

        let total = self.config.orders_per_strategy();

        for cycle in 1..=total {
            if !self.shutdown.is_running() {
                self.summary.interrupted = true;
                break;
            }

            let drawn = self.config.bounds().draw(&mut self.rng);
            let mut report = CycleReport::new(cycle, drawn);
            let result = self.run_cycle(&mut report, &mut book).await;
            self.summary.add(&report);
            result?;

            info!(
                "Cycle {}/{}: {} submitted, {} accepted, {} failed",
                cycle, total, report.submitted, report.accepted, report.failed
            );

            let pause = self.config.cycle_pause();
            if cycle < total && !pause.is_zero() {
                debug!("Pausing {:?} before next cycle", pause);
                self.shutdown.interruptible_sleep(pause).await;
            }
        }

        Ok(self.summary)
    }

    async fn run_cycle(&mut self, report: &mut CycleReport, book: &mut OrderBook) -> Result<()> {
        debug!("Cycle {}: submitting {} orders", report.cycle, report.drawn);

        for _ in 0..report.drawn {
            if !self.shutdown.is_running() {
                self.summary.interrupted = true;
                break;
            }

            let Some(order) = book.next_order() else {
                break;
            };

            let outcome = match self.session.submit(order).await {
                Ok(ack) => {
                    info!(
                        "Order created | id={} strategy={} side={} amount={} state={}",
                        ack.id,
                        order.strategy_id,
                        order.side,
                        order.amount,
                        ack.state.as_deref().unwrap_or("-")
                    );
                    OrderOutcome::Accepted { order_id: ack.id }
                }
                Err(e) if e.is_fatal() => {
                    report.record(&OrderOutcome::Failed { class: e.class() });
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        "Order failed | strategy={} side={} | {}: {}",
                        order.strategy_id,
                        order.side,
                        e.class(),
                        e
                    );
                    OrderOutcome::Failed { class: e.class() }
                }
            };
            report.record(&outcome);
        }

        Ok(())
    }
}
