//! Wire types for the Paradigm FSPD RESToverHTTP and WebSocket APIs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
}

/// A tradable FSPD strategy
///
/// `min_block_size` is kept exactly as the venue sent it (number or
/// string) so it can be echoed back as an order amount.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Strategy {
    pub id: String,
    #[serde(deserialize_with = "number_or_string")]
    pub min_block_size: Value,
    #[serde(default)]
    pub name: Option<String>,
}

impl Strategy {
    pub fn new(id: impl Into<String>, min_block_size: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            min_block_size: min_block_size.into(),
            name: None,
        }
    }
}

/// Response page of `GET /v1/fs/strategies`
#[derive(Debug, Clone, Deserialize)]
pub struct StrategiesPage {
    pub results: Vec<Strategy>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Body of `POST /v1/fs/orders`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub account_name: String,
    pub strategy_id: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub amount: Value,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl OrderRequest {
    /// MARKET order for the strategy's minimum block size
    pub fn market(account_name: impl Into<String>, strategy: &Strategy, side: Side) -> Self {
        Self {
            account_name: account_name.into(),
            strategy_id: strategy.id.clone(),
            order_type: OrderType::Market,
            amount: strategy.min_block_size.clone(),
            side,
            price: None,
        }
    }

    /// Turn into a LIMIT order at the given price
    pub fn with_limit_price(mut self, price: impl Into<String>) -> Self {
        self.order_type = OrderType::Limit;
        self.price = Some(price.into());
        self
    }
}

/// Venue acknowledgement of a created order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderAck {
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Outbound JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub id: u64,
    pub jsonrpc: &'static str,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id,
            jsonrpc: "2.0",
            method: method.into(),
            params,
        }
    }
}

/// Any inbound JSON-RPC 2.0 frame: a response (`id` + `result`/`error`)
/// or a notification (`method` + `params`)
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcMessage {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcMessage {
    /// Channel name of a subscription notification
    pub fn channel(&self) -> Option<&str> {
        self.params.as_ref()?.get("channel")?.as_str()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Number(_) => Ok(value),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(_) => Ok(Value::String(s)),
            Err(e) => Err(serde::de::Error::custom(format!(
                "min_block_size '{}' is not numeric: {}",
                s, e
            ))),
        },
        other => Err(serde::de::Error::custom(format!(
            "expected number or string, got {}",
            other
        ))),
    }
}
