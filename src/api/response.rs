use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

use crate::error::AppError;

pub const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RATE_RESET: &str = "x-ratelimit-reset";

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
    pub elapsed: Duration,
}

/// Rate-limit state reported by the API on every response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset: Option<DateTime<Utc>>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Turn a non-2xx response into an application error carrying the
    /// API's own message.
    pub fn error_for_status(self) -> Result<Self, AppError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::Application {
                status: self.status,
                message: self.error_message(),
            })
        }
    }

    /// Best message the body offers: `error`, then `errors`, then the raw body.
    pub fn error_message(&self) -> String {
        if let Some(msg) = self.body.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(errors) = self.body.get("errors").and_then(|v| v.as_array()) {
            let parts: Vec<String> = errors
                .iter()
                .map(|e| match e.as_str() {
                    Some(s) => s.to_string(),
                    None => e.to_string(),
                })
                .collect();
            if !parts.is_empty() {
                return parts.join("; ");
            }
        }
        match &self.body {
            serde_json::Value::Null => reqwest::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("no response body")
                .to_string(),
            serde_json::Value::String(s) if !s.is_empty() => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn latency_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn rate_limit(&self) -> RateLimit {
        RateLimit {
            limit: header_u64(&self.headers, HEADER_RATE_LIMIT),
            remaining: header_u64(&self.headers, HEADER_RATE_REMAINING),
            reset: self
                .headers
                .get(HEADER_RATE_RESET)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<i64>().ok())
                .and_then(|epoch| DateTime::from_timestamp(epoch, 0)),
        }
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Decode a response body: JSON when possible, the raw text otherwise, and
/// null for an empty body.
pub fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}
