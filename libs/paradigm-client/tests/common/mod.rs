//! Local WebSocket venue for order channel tests

#![allow(dead_code)]

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::Message;

/// How the mock venue answers
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Confirm the subscription and push one order update
    Confirm,
    /// Confirm, then close the connection
    ConfirmThenClose,
    /// Answer the subscribe request with a JSON-RPC error
    Reject,
    /// Never answer
    Silent,
    /// Refuse the upgrade with HTTP 401
    Unauthorized,
}

pub struct MockWsServer {
    pub addr: SocketAddr,
    uris: Arc<Mutex<Vec<String>>>,
    shutdown: Arc<Notify>,
}

impl MockWsServer {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let uris = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(Notify::new());

        let uris_clone = Arc::clone(&uris);
        let shutdown_clone = Arc::clone(&shutdown);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => match result {
                        Ok((stream, _)) => {
                            tokio::spawn(handle_connection(stream, reply, Arc::clone(&uris_clone)));
                        }
                        Err(_) => break,
                    },
                    _ = shutdown_clone.notified() => break,
                }
            }
        });

        Self {
            addr,
            uris,
            shutdown,
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/v1/fs", self.addr)
    }

    /// Request URIs seen during the upgrade
    pub fn uris(&self) -> Vec<String> {
        self.uris.lock().clone()
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown.notify_waiters();
    }
}

async fn handle_connection(stream: TcpStream, reply: Reply, uris: Arc<Mutex<Vec<String>>>) {
    let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        uris.lock().push(req.uri().to_string());
        if let Reply::Unauthorized = reply {
            let mut refused = ErrorResponse::new(Some("invalid api key".to_string()));
            *refused.status_mut() = StatusCode::UNAUTHORIZED;
            return Err(refused);
        }
        Ok(resp)
    };

    let ws = match accept_hdr_async(stream, callback).await {
        Ok(ws) => ws,
        Err(_) => return,
    };
    let (mut write, mut read) = ws.split();

    while let Some(Ok(msg)) = read.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let request: Value = serde_json::from_str(&text).unwrap_or_default();
        let id = request["id"].clone();

        let replies = match (request["method"].as_str(), reply) {
            (Some("subscribe"), Reply::Confirm) => vec![
                json!({"id": id, "jsonrpc": "2.0", "result": {"channel": "orders"}}),
                json!({
                    "jsonrpc": "2.0",
                    "method": "subscription",
                    "params": {"channel": "orders", "data": {"id": "o1", "state": "FILLED"}}
                }),
            ],
            (Some("subscribe"), Reply::ConfirmThenClose) => {
                let confirm = json!({"id": id, "jsonrpc": "2.0", "result": {"channel": "orders"}});
                let _ = write.send(Message::Text(confirm.to_string())).await;
                let _ = write.send(Message::Close(None)).await;
                break;
            }
            (Some("subscribe"), Reply::Reject) => vec![json!({
                "id": id,
                "jsonrpc": "2.0",
                "error": {"code": -32602, "message": "Invalid channel"}
            })],
            (Some("heartbeat"), _) => vec![json!({"id": id, "jsonrpc": "2.0", "result": {}})],
            _ => vec![],
        };

        for frame in replies {
            if write.send(Message::Text(frame.to_string())).await.is_err() {
                return;
            }
        }
    }
}
