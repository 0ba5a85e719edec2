//! Stub venue for runner tests
//!
//! Records every connect, submitted order and teardown so tests can assert
//! on what the runner did without any network access.

#![allow(dead_code)]

use async_trait::async_trait;
use paradigm_auto_taker::config::{Credentials, LogLevel, RunConfig};
use paradigm_auto_taker::error::{Result, TakerError};
use paradigm_auto_taker::paradigm_client::{Environment, OrderAck, OrderRequest, Strategy};
use paradigm_auto_taker::session::{Connector, Session};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Default)]
pub struct VenueLog {
    pub connects: usize,
    pub submitted: Vec<OrderRequest>,
    pub closed: bool,
}

pub type SharedLog = Arc<Mutex<VenueLog>>;

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    AcceptAll,
    RejectCredentials,
    /// Every n-th order fails with a network error
    FailEvery(usize),
    /// Orders after the n-th are rejected as unauthorized
    RevokeAfter(usize),
}

pub struct StubVenue {
    strategies: Vec<Strategy>,
    behaviour: Behaviour,
    log: SharedLog,
}

impl StubVenue {
    pub fn new(strategies: Vec<Strategy>, behaviour: Behaviour) -> Self {
        Self {
            strategies,
            behaviour,
            log: SharedLog::default(),
        }
    }

    pub fn accepting(strategies: Vec<Strategy>) -> Self {
        Self::new(strategies, Behaviour::AcceptAll)
    }

    pub fn log(&self) -> SharedLog {
        Arc::clone(&self.log)
    }
}

pub struct StubSession {
    strategies: Vec<Strategy>,
    behaviour: Behaviour,
    log: SharedLog,
}

#[async_trait]
impl Connector for StubVenue {
    type Session = StubSession;

    async fn connect(&self, _config: &RunConfig) -> Result<StubSession> {
        self.log.lock().connects += 1;

        if let Behaviour::RejectCredentials = self.behaviour {
            return Err(TakerError::Authentication(
                "Credentials rejected: 401 Unauthorized".to_string(),
            ));
        }

        Ok(StubSession {
            strategies: self.strategies.clone(),
            behaviour: self.behaviour,
            log: Arc::clone(&self.log),
        })
    }
}

#[async_trait]
impl Session for StubSession {
    async fn strategies(&mut self) -> Result<Vec<Strategy>> {
        Ok(self.strategies.clone())
    }

    async fn submit(&mut self, order: &OrderRequest) -> Result<OrderAck> {
        let mut log = self.log.lock();
        log.submitted.push(order.clone());
        let count = log.submitted.len();

        match self.behaviour {
            Behaviour::FailEvery(n) if count % n == 0 => {
                Err(TakerError::Network("connection reset".to_string()))
            }
            Behaviour::RevokeAfter(n) if count > n => {
                Err(TakerError::Authentication("key revoked".to_string()))
            }
            _ => Ok(OrderAck {
                id: format!("order-{}", count),
                state: Some("FILLED".to_string()),
            }),
        }
    }

    async fn close(&mut self) {
        self.log.lock().closed = true;
    }
}

pub fn strategies() -> Vec<Strategy> {
    vec![
        Strategy::new("btc-spread", 25000),
        Strategy::new("eth-spread", "100"),
    ]
}

pub fn run_config(orders_per_strategy: u32, lower: u32, upper: u32) -> RunConfig {
    RunConfig::new(
        Environment::Test,
        LogLevel::Info,
        Credentials {
            account_name: "taker-qa".to_string(),
            access_key: "access-key".to_string(),
            secret_key: "c2VjcmV0LWtleQ==".to_string(),
        },
        orders_per_strategy,
        lower,
        upper,
    )
    .expect("valid test config")
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Local HTTP venue answering every request with one canned response
pub struct CannedHttp {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedHttp {
    pub async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(answer(stream, status, body, Arc::clone(&seen)));
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Request heads received so far, lowercased
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

async fn answer(
    mut stream: TcpStream,
    status: u16,
    body: &'static str,
    seen: Arc<Mutex<Vec<String>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    // Read the whole request so closing the socket does not reset it
    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                seen.lock().push(head);
                break;
            }
        }
    }

    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
