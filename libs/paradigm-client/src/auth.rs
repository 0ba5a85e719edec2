use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_HEADER: &str = "Paradigm-API-Timestamp";
pub const SIGNATURE_HEADER: &str = "Paradigm-API-Signature";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Secret key is not valid base64")]
    InvalidSecret,

    #[error("Access key is empty")]
    MissingAccessKey,

    #[error("HMAC error: {0}")]
    HmacError(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// Paradigm request signer
///
/// Holds the access key and the decoded signing key. Neither is ever
/// printed: `Debug` only shows that they are set.
#[derive(Clone)]
pub struct ParadigmAuth {
    access_key: String,
    signing_key: Vec<u8>,
}

impl ParadigmAuth {
    /// Create a signer from the venue access key and base64 secret key
    pub fn new(access_key: &str, secret_key: &str) -> Result<Self> {
        if access_key.trim().is_empty() {
            return Err(AuthError::MissingAccessKey);
        }

        let signing_key = STANDARD
            .decode(secret_key.trim())
            .map_err(|_| AuthError::InvalidSecret)?;

        Ok(Self {
            access_key: access_key.to_string(),
            signing_key,
        })
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Sign a RESToverHTTP request
    ///
    /// The signature is computed as:
    /// 1. Build message: timestamp \n METHOD \n path \n body
    /// 2. HMAC-SHA256 sign with the base64-decoded secret
    /// 3. Base64-encode the digest
    pub fn sign_request(
        &self,
        timestamp_ms: u64,
        method: &str,
        path: &str,
        body: &str,
    ) -> Result<String> {
        let message = format!(
            "{}\n{}\n{}\n{}",
            timestamp_ms,
            method.to_uppercase(),
            path,
            body
        );

        let mut mac = HmacSha256::new_from_slice(&self.signing_key)
            .map_err(|e| AuthError::HmacError(e.to_string()))?;
        mac.update(message.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Build authentication headers for a RESToverHTTP request
    pub fn headers(
        &self,
        timestamp_ms: u64,
        method: &str,
        path: &str,
        body: &str,
    ) -> Result<HashMap<String, String>> {
        let signature = self.sign_request(timestamp_ms, method, path, body)?;

        let mut headers = HashMap::new();
        headers.insert(TIMESTAMP_HEADER.to_string(), timestamp_ms.to_string());
        headers.insert(SIGNATURE_HEADER.to_string(), signature);
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.access_key),
        );

        Ok(headers)
    }

    /// Current Unix timestamp in milliseconds
    pub fn current_timestamp_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

impl fmt::Debug for ParadigmAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParadigmAuth")
            .field("access_key", &"<redacted>")
            .field("signing_key", &"<redacted>")
            .finish()
    }
}
