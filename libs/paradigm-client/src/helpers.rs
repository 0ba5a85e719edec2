//! Shared HTTP helper functions for the REST client
//!
//! Provides common patterns for error handling, response validation,
//! and request building.

use reqwest::{RequestBuilder, StatusCode};
use std::collections::HashMap;

use super::rest::RestError;

/// Extract error message from a failed API response
pub async fn extract_api_error(response: reqwest::Response, context: &str) -> RestError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return RestError::Unauthorized(format!("{} ({}): {}", context, status, error_text));
    }

    RestError::ApiError {
        status: status.as_u16(),
        message: format!("{}: {}", context, error_text),
    }
}

/// Check that the response carries the expected status, returning it or an error
pub async fn require_status(
    response: reqwest::Response,
    expected: StatusCode,
    context: &str,
) -> Result<reqwest::Response, RestError> {
    if response.status() != expected {
        return Err(extract_api_error(response, context).await);
    }
    Ok(response)
}

/// Add headers from a HashMap to a request builder
pub fn with_headers(req: RequestBuilder, headers: HashMap<String, String>) -> RequestBuilder {
    headers
        .into_iter()
        .fold(req, |r, (k, v)| r.header(k, v))
}

/// Deserialize JSON response with proper error handling
pub async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, RestError> {
    response
        .json()
        .await
        .map_err(|e| RestError::DeserializeFailed(e.to_string()))
}
