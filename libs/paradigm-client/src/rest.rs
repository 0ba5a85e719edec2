//! RESToverHTTP client for Paradigm FSPD

use crate::auth::{AuthError, ParadigmAuth};
use crate::helpers::{parse_json, require_status, with_headers};
use crate::types::*;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const STRATEGIES_PATH: &str = "/v1/fs/strategies?page_size=100";
pub const ORDERS_PATH: &str = "/v1/fs/orders";

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Credentials rejected: {0}")]
    Unauthorized(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(#[from] AuthError),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("Serialization failed: {0}")]
    SerializeFailed(String),
}

pub type Result<T> = std::result::Result<T, RestError>;

/// REST API client for Paradigm FSPD
pub struct RestClient {
    pub(crate) base_url: String,
    pub(crate) client: Client,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `[GET] /strategies`: all strategies available to the taker
    pub async fn get_strategies(&self, auth: &ParadigmAuth) -> Result<Vec<Strategy>> {
        let url = format!("{}{}", self.base_url, STRATEGIES_PATH);
        let timestamp = ParadigmAuth::current_timestamp_ms();

        debug!("Fetching strategies from {}", url);

        let headers = auth.headers(timestamp, "GET", STRATEGIES_PATH, "")?;
        let response = with_headers(self.client.get(&url), headers).send().await?;
        let response = require_status(response, StatusCode::OK, "Unable to [GET] /strategies").await?;

        let page: StrategiesPage = parse_json(response).await?;
        if page.next.is_some() {
            debug!("More than one page of strategies available, using the first");
        }

        debug!("Fetched {} strategies", page.results.len());
        Ok(page.results)
    }

    /// `[POST] /orders`: create an order
    pub async fn create_order(&self, auth: &ParadigmAuth, order: &OrderRequest) -> Result<OrderAck> {
        let url = format!("{}{}", self.base_url, ORDERS_PATH);
        let timestamp = ParadigmAuth::current_timestamp_ms();

        let body = serde_json::to_string(order)
            .map_err(|e| RestError::SerializeFailed(e.to_string()))?;

        debug!("Posting {} order for strategy {}", order.side, order.strategy_id);

        let headers = auth.headers(timestamp, "POST", ORDERS_PATH, &body)?;
        let req = with_headers(
            self.client.post(&url).header("Content-Type", "application/json"),
            headers,
        );
        let response = req.body(body).send().await?;
        let response = require_status(response, StatusCode::CREATED, "Unable to [POST] /orders").await?;

        parse_json(response).await
    }
}
