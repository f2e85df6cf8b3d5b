use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::api::client::LifxClient;
use crate::api::response::ApiResponse;
use crate::error::{AppError, TransportKind};
use crate::models::light::list_from_json;
use crate::models::selector::Selector;
use crate::render::humanize::humanize;

/// Outcome of `test-connection`. Failures are captured here rather than
/// raised, so the report is always rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub base_url: String,
    pub selector: Selector,
    pub verify_tls: bool,
    pub reachable: bool,
    pub http_status: Option<u16>,
    pub light_count: usize,
    pub ssl_ok: bool,
    pub error_kind: Option<&'static str>,
    pub error_detail: Option<String>,
    pub lights: serde_json::Value,
}

impl ConnectionReport {
    /// A selector matching no lights still counts as reachable.
    pub fn from_outcome(
        base_url: &str,
        selector: Selector,
        verify_tls: bool,
        outcome: Result<ApiResponse, AppError>,
    ) -> Self {
        let mut report = Self {
            base_url: base_url.to_string(),
            selector,
            verify_tls,
            reachable: false,
            http_status: None,
            light_count: 0,
            ssl_ok: true,
            error_kind: None,
            error_detail: None,
            lights: serde_json::Value::Array(Vec::new()),
        };

        match outcome.and_then(ApiResponse::error_for_status) {
            Ok(response) => {
                report.reachable = true;
                report.http_status = Some(response.status);
                report.light_count = list_from_json::<serde_json::Value>(&response.body).len();
                report.lights = response.body;
            }
            Err(err) => {
                if let AppError::Application { status, .. } = &err {
                    report.http_status = Some(*status);
                }
                if let AppError::Transport {
                    kind: TransportKind::Tls,
                    ..
                } = &err
                {
                    report.ssl_ok = false;
                }
                report.error_kind = Some(err.kind());
                report.error_detail = Some(err.to_string());
            }
        }
        report
    }
}

/// Result of `health-check`, derived from a single probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub http_status: Option<u16>,
    pub latency_ms: u64,
    pub rate_limit_total: Option<u64>,
    pub rate_limit_remaining: Option<u64>,
    pub rate_limit_reset: Option<DateTime<Utc>>,
    pub rate_limit_reset_in: Option<String>,
    pub ok: bool,
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
}

impl HealthSnapshot {
    /// `ok` depends only on the connection succeeding with a 2xx status; the
    /// remaining rate-limit budget is reported but never affects it.
    pub fn from_outcome(
        outcome: &Result<ApiResponse, AppError>,
        latency: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let mut snapshot = Self {
            http_status: None,
            latency_ms: latency.as_millis() as u64,
            rate_limit_total: None,
            rate_limit_remaining: None,
            rate_limit_reset: None,
            rate_limit_reset_in: None,
            ok: false,
            error_kind: None,
            error: None,
        };

        match outcome {
            Ok(response) => {
                let rate = response.rate_limit();
                snapshot.http_status = Some(response.status);
                snapshot.rate_limit_total = rate.limit;
                snapshot.rate_limit_remaining = rate.remaining;
                snapshot.rate_limit_reset = rate.reset;
                snapshot.rate_limit_reset_in = rate.reset.map(|at| humanize(at, now));
                snapshot.ok = response.is_success();
                if !snapshot.ok {
                    snapshot.error_kind = Some("application");
                    snapshot.error = Some(response.error_message());
                }
            }
            Err(err) => {
                snapshot.error_kind = Some(err.kind());
                snapshot.error = Some(err.to_string());
            }
        }
        snapshot
    }

    pub fn rate_limit_exhausted(&self) -> bool {
        self.rate_limit_remaining == Some(0)
    }
}

pub struct Diagnostics<'a> {
    client: &'a LifxClient,
}

impl<'a> Diagnostics<'a> {
    pub fn new(client: &'a LifxClient) -> Self {
        Self { client }
    }

    pub async fn test_connection(&self, selector: &Selector) -> ConnectionReport {
        let outcome = self.client.list_lights(selector).await;
        let report = ConnectionReport::from_outcome(
            self.client.base_url(),
            selector.clone(),
            self.client.verify_tls(),
            outcome,
        );
        info!(
            %selector,
            reachable = report.reachable,
            lights = report.light_count,
            "connection test finished"
        );
        report
    }

    pub async fn health_check(&self) -> HealthSnapshot {
        let started = Instant::now();
        let outcome = self.client.probe(&Selector::All).await;
        let latency = started.elapsed();

        let snapshot = HealthSnapshot::from_outcome(&outcome, latency, Utc::now());
        if snapshot.rate_limit_exhausted() {
            warn!("rate limit exhausted; further calls will be rejected until reset");
        }
        info!(
            ok = snapshot.ok,
            latency_ms = snapshot.latency_ms,
            "health check finished"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue};
    use serde_json::json;

    use super::*;
    use crate::api::response::{HEADER_RATE_LIMIT, HEADER_RATE_REMAINING, HEADER_RATE_RESET};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn response(status: u16, remaining: &'static str) -> ApiResponse {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_RATE_LIMIT, HeaderValue::from_static("120"));
        headers.insert(HEADER_RATE_REMAINING, HeaderValue::from_static(remaining));
        headers.insert(HEADER_RATE_RESET, HeaderValue::from_static("1700000120"));
        ApiResponse {
            status,
            headers,
            body: json!([]),
            elapsed: Duration::from_millis(80),
        }
    }

    #[test]
    fn test_exhausted_rate_limit_is_still_ok() {
        let snapshot =
            HealthSnapshot::from_outcome(&Ok(response(200, "0")), Duration::from_millis(95), now());
        assert!(snapshot.ok);
        assert!(snapshot.rate_limit_exhausted());
        assert_eq!(snapshot.rate_limit_total, Some(120));
        assert_eq!(snapshot.latency_ms, 95);
        assert_eq!(snapshot.rate_limit_reset_in.as_deref(), Some("in 2 minutes"));
    }

    #[test]
    fn test_non_success_status_is_not_ok() {
        let snapshot =
            HealthSnapshot::from_outcome(&Ok(response(401, "119")), Duration::ZERO, now());
        assert!(!snapshot.ok);
        assert_eq!(snapshot.http_status, Some(401));
        assert_eq!(snapshot.error_kind, Some("application"));
    }

    #[test]
    fn test_timeout_is_not_ok() {
        let err = AppError::Transport {
            kind: TransportKind::Timeout,
            message: "operation timed out".into(),
        };
        let snapshot = HealthSnapshot::from_outcome(&Err(err), Duration::from_secs(10), now());
        assert!(!snapshot.ok);
        assert_eq!(snapshot.http_status, None);
        assert_eq!(snapshot.error_kind, Some("transport"));
        assert_eq!(snapshot.rate_limit_reset_in, None);
    }

    #[test]
    fn test_zero_lights_is_reachable() {
        let report = ConnectionReport::from_outcome(
            "https://api.lifx.com/v1",
            Selector::Group("Nowhere".into()),
            true,
            Ok(response(200, "100")),
        );
        assert!(report.reachable);
        assert_eq!(report.light_count, 0);
        assert!(report.error_detail.is_none());
    }

    #[test]
    fn test_tls_failure_clears_ssl_ok() {
        let report = ConnectionReport::from_outcome(
            "https://api.lifx.com/v1",
            Selector::All,
            true,
            Err(AppError::Transport {
                kind: TransportKind::Tls,
                message: "invalid peer certificate".into(),
            }),
        );
        assert!(!report.reachable);
        assert!(!report.ssl_ok);
        assert_eq!(report.error_kind, Some("transport"));
    }

    #[test]
    fn test_application_failure_keeps_status() {
        let mut unauthorized = response(401, "100");
        unauthorized.body = json!({"error": "Invalid token"});
        let report = ConnectionReport::from_outcome(
            "https://api.lifx.com/v1",
            Selector::All,
            true,
            Ok(unauthorized),
        );
        assert!(!report.reachable);
        assert!(report.ssl_ok);
        assert_eq!(report.http_status, Some(401));
        assert!(report.error_detail.unwrap().contains("Invalid token"));
    }
}
