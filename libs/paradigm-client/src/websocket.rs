//! JSONRPCoverWebSocket order notification channel
//!
//! Subscribes to the `orders` channel so venue acknowledgements of the
//! taker's orders show up in the log, and keeps the connection alive with
//! periodic `heartbeat` requests.

use crate::auth::ParadigmAuth;
use crate::types::{JsonRpcMessage, JsonRpcRequest};
use futures::{SinkExt, StreamExt};
use reqwest::Url;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const ORDERS_CHANNEL: &str = "orders";

const SUBSCRIBE_ID: u64 = 1;
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum WsError {
    #[error("WebSocket connection failed: {0}")]
    Connect(String),

    #[error("WebSocket handshake rejected with HTTP {0}")]
    Unauthorized(u16),

    #[error("Subscription rejected: {0}")]
    Rejected(String),

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("Connection closed by venue")]
    Closed,

    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, WsError>;

/// Inbound frame, classified
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Notification on the `orders` channel
    OrderUpdate(Value),
    /// Successful response to one of our requests
    Response(u64),
    /// Error response
    Error(String),
    /// Anything else (other channels, unparseable text)
    Other,
}

impl Frame {
    pub fn parse(text: &str) -> Self {
        let msg: JsonRpcMessage = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(_) => return Frame::Other,
        };

        if let Some(err) = &msg.error {
            return Frame::Error(format!("{} ({})", err.message, err.code));
        }

        if msg.channel() == Some(ORDERS_CHANNEL) {
            let data = msg
                .params
                .as_ref()
                .and_then(|p| p.get("data"))
                .cloned()
                .unwrap_or(Value::Null);
            return Frame::OrderUpdate(data);
        }

        match msg.id {
            Some(id) if msg.result.is_some() => Frame::Response(id),
            _ => Frame::Other,
        }
    }
}

/// Live `orders` subscription, read by a background task
pub struct OrderChannel {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl OrderChannel {
    /// Connect, subscribe to `orders`, and wait for the venue to confirm
    pub async fn subscribe(ws_url: &str, auth: &ParadigmAuth) -> Result<Self> {
        Self::subscribe_within(ws_url, auth, HANDSHAKE_TIMEOUT).await
    }

    /// `subscribe` with an explicit limit on the handshake and on the
    /// subscription confirmation
    pub async fn subscribe_within(ws_url: &str, auth: &ParadigmAuth, wait: Duration) -> Result<Self> {
        let url = subscription_url(ws_url, auth.access_key())?;
        let encoded_key = url
            .query()
            .and_then(|q| q.strip_prefix("api-key="))
            .unwrap_or_default()
            .to_string();

        info!("Connecting to {}", ws_url);

        let (mut stream, _) = timeout(wait, connect_async(url.as_str()))
            .await
            .map_err(|_| WsError::Timeout("WebSocket handshake"))?
            .map_err(|e| connect_error(e, &[auth.access_key(), encoded_key.as_str()]))?;

        let request = JsonRpcRequest::new(
            SUBSCRIBE_ID,
            "subscribe",
            Some(json!({ "channel": ORDERS_CHANNEL })),
        );
        send_request(&mut stream, &request).await?;

        timeout(wait, await_response(&mut stream, SUBSCRIBE_ID))
            .await
            .map_err(|_| WsError::Timeout("subscription response"))??;

        info!("Subscribed to '{}' channel", ORDERS_CHANNEL);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run_channel(stream, shutdown_rx));

        Ok(Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn is_open(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Close the connection and wait for the reader task to finish
    pub async fn close(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// WebSocket URL with the access key as a percent-encoded `api-key` query
pub fn subscription_url(ws_url: &str, access_key: &str) -> Result<Url> {
    let mut url = Url::parse(ws_url).map_err(|e| WsError::Connect(format!("{}: {}", ws_url, e)))?;
    url.query_pairs_mut().append_pair("api-key", access_key);
    Ok(url)
}

fn connect_error(e: tungstenite::Error, secrets: &[&str]) -> WsError {
    match e {
        tungstenite::Error::Http(response)
            if matches!(response.status().as_u16(), 401 | 403) =>
        {
            WsError::Unauthorized(response.status().as_u16())
        }
        // URL errors echo the request URI, which carries the access key
        other => {
            let message = secrets
                .iter()
                .filter(|s| !s.is_empty())
                .fold(other.to_string(), |m, s| m.replace(s, "<redacted>"));
            WsError::Connect(message)
        }
    }
}

async fn send_request(stream: &mut WsStream, request: &JsonRpcRequest) -> Result<()> {
    let text = serde_json::to_string(request).map_err(|e| WsError::Serialize(e.to_string()))?;
    stream
        .send(Message::Text(text))
        .await
        .map_err(|e| WsError::Connect(e.to_string()))
}

async fn await_response(stream: &mut WsStream, id: u64) -> Result<()> {
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => match Frame::parse(&text) {
                Frame::Response(got) if got == id => return Ok(()),
                Frame::Error(message) => return Err(WsError::Rejected(message)),
                _ => continue,
            },
            Some(Ok(Message::Close(_))) | None => return Err(WsError::Closed),
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(WsError::Connect(e.to_string())),
        }
    }
}

async fn run_channel(stream: WsStream, mut shutdown_rx: oneshot::Receiver<()>) {
    let (mut write, mut read) = stream.split();

    let mut heartbeat = interval(HEARTBEAT_INTERVAL);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);
    heartbeat.tick().await;

    let mut next_id = SUBSCRIBE_ID + 1;

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                let _ = write.send(Message::Close(None)).await;
                debug!("Order channel closed");
                break;
            }
            _ = heartbeat.tick() => {
                let request = JsonRpcRequest::new(next_id, "heartbeat", None);
                next_id += 1;

                let text = match serde_json::to_string(&request) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Failed to serialize heartbeat: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(text)).await {
                    warn!("Heartbeat failed, order channel stopped: {}", e);
                    break;
                }
            }
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => match Frame::parse(&text) {
                    Frame::OrderUpdate(data) => info!("Order update: {}", data),
                    Frame::Error(message) => warn!("Order channel error: {}", message),
                    Frame::Response(id) => debug!("Response to request {}", id),
                    Frame::Other => debug!("Unhandled message: {}", text),
                },
                Some(Ok(Message::Ping(payload))) => {
                    let _ = write.send(Message::Pong(payload)).await;
                }
                Some(Ok(Message::Close(frame))) => {
                    warn!("Order channel closed by venue: {:?}", frame);
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Order channel error, stopped: {}", e);
                    break;
                }
                None => {
                    warn!("Order channel stream ended");
                    break;
                }
            }
        }
    }
}
