pub mod humanize;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::diagnostics::{ConnectionReport, HealthSnapshot};
use crate::models::outcome::{DispatchOutcome, LightList, SceneList};
use humanize::{humanize, humanize_epoch};

/// Uniform output of every command.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedResult {
    pub summary: String,
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
    pub context_key: &'static str,
}

impl RenderedResult {
    pub fn to_markdown(&self) -> String {
        let mut out = format!("### {}\n\n{}\n", self.summary, self.table);
        if let Some(raw) = &self.raw {
            out.push_str("\n```json\n");
            out.push_str(&serde_json::to_string_pretty(raw).unwrap_or_default());
            out.push_str("\n```\n");
        }
        out
    }
}

pub trait Render {
    fn render_at(&self, verbose: bool, now: DateTime<Utc>) -> RenderedResult;

    fn render(&self, verbose: bool) -> RenderedResult {
        self.render_at(verbose, Utc::now())
    }
}

pub fn render<R: Render>(result: &R, verbose: bool) -> RenderedResult {
    result.render(verbose)
}

fn markdown_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::markdown()).to_string()
}

fn raw_if(verbose: bool, value: &serde_json::Value) -> Option<serde_json::Value> {
    verbose.then(|| value.clone())
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "FIELD")]
    field: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

fn field(field: &'static str, value: impl Into<String>) -> FieldRow {
    FieldRow {
        field,
        value: value.into(),
    }
}

#[derive(Tabled)]
struct LightRow {
    #[tabled(rename = "LABEL")]
    label: String,
    #[tabled(rename = "POWER")]
    power: String,
    #[tabled(rename = "BRIGHTNESS")]
    brightness: String,
    #[tabled(rename = "CONNECTED")]
    connected: String,
    #[tabled(rename = "GROUP")]
    group: String,
    #[tabled(rename = "LOCATION")]
    location: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "LAST SEEN")]
    last_seen: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl Render for LightList {
    fn render_at(&self, verbose: bool, now: DateTime<Utc>) -> RenderedResult {
        let rows: Vec<LightRow> = self
            .lights
            .iter()
            .map(|light| LightRow {
                label: light.label_or_id().to_string(),
                power: or_dash(light.power.clone()),
                brightness: or_dash(light.brightness.map(|b| format!("{:.0}%", b * 100.0))),
                connected: match light.connected {
                    Some(true) => "yes",
                    Some(false) => "no",
                    None => "-",
                }
                .to_string(),
                group: light.group_name().to_string(),
                location: light.location_name().to_string(),
                model: light.product_name().to_string(),
                last_seen: or_dash(light.last_seen.as_deref().map(|seen| {
                    DateTime::parse_from_rfc3339(seen)
                        .map(|at| humanize(at.with_timezone(&Utc), now))
                        .unwrap_or_else(|_| seen.to_string())
                })),
                id: or_dash(light.id.clone()),
            })
            .collect();

        RenderedResult {
            summary: format!(
                "LIFX Lights (selector=\"{}\"): {} found",
                self.selector,
                self.lights.len()
            ),
            table: markdown_table(&rows),
            raw: raw_if(verbose, &self.raw),
            context_key: "LIFX.Light",
        }
    }
}

#[derive(Tabled)]
struct SceneRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "STATES")]
    states: usize,
    #[tabled(rename = "UPDATED")]
    updated: String,
    #[tabled(rename = "UUID")]
    uuid: String,
}

impl Render for SceneList {
    fn render_at(&self, verbose: bool, now: DateTime<Utc>) -> RenderedResult {
        let rows: Vec<SceneRow> = self
            .scenes
            .iter()
            .map(|scene| SceneRow {
                name: or_dash(scene.name.clone()),
                states: scene.states.len(),
                updated: or_dash(
                    scene
                        .updated_at
                        .or(scene.created_at)
                        .map(|epoch| humanize_epoch(epoch, now)),
                ),
                uuid: or_dash(scene.uuid.clone()),
            })
            .collect();

        RenderedResult {
            summary: format!("LIFX Scenes: {} found", self.scenes.len()),
            table: markdown_table(&rows),
            raw: raw_if(verbose, &self.raw),
            context_key: "LIFX.Scene",
        }
    }
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "LABEL")]
    label: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

impl Render for DispatchOutcome {
    fn render_at(&self, verbose: bool, _now: DateTime<Utc>) -> RenderedResult {
        let rows: Vec<DeviceRow> = if self.results.is_empty() {
            // 202 responses (fast mode) carry no per-device results.
            vec![DeviceRow {
                id: self.target.clone(),
                label: "-".to_string(),
                status: "ok".to_string(),
            }]
        } else {
            self.results
                .iter()
                .map(|r| DeviceRow {
                    id: or_dash(r.id.clone()),
                    label: or_dash(r.label.clone()),
                    status: or_dash(r.status.clone()),
                })
                .collect()
        };

        let state = if self.is_complete() {
            "success".to_string()
        } else {
            format!(
                "partial: {} of {} devices ok",
                self.ok_count(),
                self.results.len()
            )
        };
        let mut summary = format!(
            "LIFX {} (target=\"{}\"): HTTP {}, {}",
            self.operation.title(),
            self.target,
            self.status,
            state
        );
        if let Some(detail) = &self.detail {
            summary.push_str(" - ");
            summary.push_str(detail);
        }

        RenderedResult {
            summary,
            table: markdown_table(&rows),
            raw: raw_if(verbose, &self.raw),
            context_key: self.operation.context_key(),
        }
    }
}

impl Render for ConnectionReport {
    fn render_at(&self, verbose: bool, _now: DateTime<Utc>) -> RenderedResult {
        let rows = vec![
            field("Base URL", self.base_url.clone()),
            field("Selector", self.selector.to_string()),
            field("Verify TLS", self.verify_tls.to_string()),
            field("Status", if self.reachable { "success" } else { "failed" }),
            field(
                "HTTP Status",
                or_dash(self.http_status.map(|s| s.to_string())),
            ),
            field("Lights Returned", self.light_count.to_string()),
            field("SSL OK", self.ssl_ok.to_string()),
            field("Error", self.error_detail.clone().unwrap_or_default()),
        ];

        let summary = if self.reachable {
            format!(
                "LIFX Connection Test: success, {} light(s) matched \"{}\"",
                self.light_count, self.selector
            )
        } else {
            format!(
                "LIFX Connection Test: failed ({})",
                self.error_kind.unwrap_or("unknown")
            )
        };

        RenderedResult {
            summary,
            table: markdown_table(&rows),
            raw: verbose.then(|| serde_json::to_value(self).unwrap_or_default()),
            context_key: "LIFX.ConnectionTest",
        }
    }
}

impl Render for HealthSnapshot {
    fn render_at(&self, verbose: bool, _now: DateTime<Utc>) -> RenderedResult {
        let rows = vec![
            field("Healthy", if self.ok { "yes" } else { "no" }),
            field(
                "HTTP Status",
                or_dash(self.http_status.map(|s| s.to_string())),
            ),
            field("Latency (ms)", self.latency_ms.to_string()),
            field(
                "Rate Limit",
                or_dash(self.rate_limit_total.map(|n| n.to_string())),
            ),
            field(
                "Remaining",
                or_dash(self.rate_limit_remaining.map(|n| n.to_string())),
            ),
            field(
                "Resets At",
                or_dash(self.rate_limit_reset.map(|at| at.to_rfc3339())),
            ),
            field("Resets", or_dash(self.rate_limit_reset_in.clone())),
            field("Error", self.error.clone().unwrap_or_default()),
        ];

        let mut summary = if self.ok {
            format!("LIFX Health Check: healthy ({} ms)", self.latency_ms)
        } else {
            format!(
                "LIFX Health Check: unhealthy ({})",
                self.error_kind.unwrap_or("unknown")
            )
        };
        if self.rate_limit_exhausted() {
            summary.push_str(" - rate limit exhausted");
        }

        RenderedResult {
            summary,
            table: markdown_table(&rows),
            raw: verbose.then(|| serde_json::to_value(self).unwrap_or_default()),
            context_key: "LIFX.Health",
        }
    }
}
