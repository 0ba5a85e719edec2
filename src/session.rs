//! Venue session
//!
//! The runner only talks to the venue through `Session`, so it can be
//! driven against a stub venue in tests. `ParadigmConnector` builds the
//! live session: signer, REST client, and the `orders` WebSocket channel.

use crate::config::RunConfig;
use crate::error::{Result, TakerError};
use async_trait::async_trait;
use paradigm_client::{OrderAck, OrderChannel, OrderRequest, ParadigmAuth, RestClient, Strategy};
use tracing::{debug, info};

/// Authenticated connection to the venue
#[async_trait]
pub trait Session: Send {
    /// Strategies available to the taker
    async fn strategies(&mut self) -> Result<Vec<Strategy>>;

    /// Submit one order and wait for the venue's acknowledgement
    async fn submit(&mut self, order: &OrderRequest) -> Result<OrderAck>;

    /// Tear the session down
    async fn close(&mut self) {}
}

/// Establishes a `Session`, authenticating with the configured credentials
#[async_trait]
pub trait Connector: Sync {
    type Session: Session;

    async fn connect(&self, config: &RunConfig) -> Result<Self::Session>;
}

/// Live Paradigm FSPD connector
#[derive(Debug, Default, Clone, Copy)]
pub struct ParadigmConnector;

pub struct ParadigmSession {
    auth: ParadigmAuth,
    rest: RestClient,
    strategies: Vec<Strategy>,
    orders: Option<OrderChannel>,
}

#[async_trait]
impl Connector for ParadigmConnector {
    type Session = ParadigmSession;

    async fn connect(&self, config: &RunConfig) -> Result<ParadigmSession> {
        let environment = config.environment();
        let credentials = config.credentials();

        let auth = ParadigmAuth::new(&credentials.access_key, &credentials.secret_key)?;
        let rest = RestClient::new(environment.http_url())?;

        info!("Authenticating against {}", rest.base_url());

        // The strategy listing doubles as the credential check
        let strategies = rest.get_strategies(&auth).await?;
        info!("Authenticated, {} strategies available", strategies.len());

        let orders = if config.ws_enabled() {
            Some(OrderChannel::subscribe(&environment.ws_url(), &auth).await?)
        } else {
            debug!("WebSocket order channel disabled");
            None
        };

        Ok(ParadigmSession {
            auth,
            rest,
            strategies,
            orders,
        })
    }
}

#[async_trait]
impl Session for ParadigmSession {
    async fn strategies(&mut self) -> Result<Vec<Strategy>> {
        Ok(self.strategies.clone())
    }

    async fn submit(&mut self, order: &OrderRequest) -> Result<OrderAck> {
        self.rest
            .create_order(&self.auth, order)
            .await
            .map_err(TakerError::from)
    }

    async fn close(&mut self) {
        if let Some(mut channel) = self.orders.take() {
            channel.close().await;
        }
        debug!("Session closed");
    }
}
