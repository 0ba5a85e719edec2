//! Paradigm FSPD venue client
//!
//! - `auth`: HMAC request signing
//! - `rest`: RESToverHTTP client for strategies and orders
//! - `websocket`: JSONRPCoverWebSocket order notification channel
//! - `environment`: venue environments and their URLs

pub mod auth;
pub mod environment;
pub mod helpers;
pub mod rest;
pub mod types;
pub mod websocket;

pub use auth::{AuthError, ParadigmAuth};
pub use environment::Environment;
pub use rest::{RestClient, RestError};
pub use types::*;
pub use websocket::{OrderChannel, WsError};
