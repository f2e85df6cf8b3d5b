use tracing::info;
use uuid::Uuid;

use crate::api::client::LifxClient;
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::models::effect::{EffectParams, SceneActivation, StateChange, TogglePower, WaveformKind};
use crate::models::selector::Selector;
use crate::models::severity::Severity;

/// Seconds per pulse cycle when an alert does not specify one.
pub const ALERT_PERIOD_SECS: f64 = 0.7;

/// Defaults of an alert flash for `severity`, before caller overrides.
pub fn alert_defaults(severity: Severity) -> EffectParams {
    let policy = severity.policy();
    EffectParams {
        color: Some(policy.color.to_string()),
        cycles: Some(f64::from(policy.cycles)),
        period: Some(ALERT_PERIOD_SECS),
        power_on: Some(true),
        persist: Some(false),
        ..Default::default()
    }
}

/// Fully merged parameters of an alert flash.
pub fn alert_params(severity: Severity, overrides: EffectParams) -> EffectParams {
    overrides.overlay(alert_defaults(severity))
}

/// Validates requests and forwards them to the API. A request that fails
/// validation never reaches the network.
pub struct EffectDispatcher<'a> {
    client: &'a LifxClient,
}

impl<'a> EffectDispatcher<'a> {
    pub fn new(client: &'a LifxClient) -> Self {
        Self { client }
    }

    pub async fn set_state(
        &self,
        selector: &Selector,
        change: &StateChange,
    ) -> Result<ApiResponse, AppError> {
        change.validate()?;
        self.client.set_state(selector, change).await
    }

    pub async fn toggle_power(
        &self,
        selector: &Selector,
        toggle: &TogglePower,
    ) -> Result<ApiResponse, AppError> {
        toggle.validate()?;
        self.client.toggle_power(selector, toggle).await
    }

    pub async fn breathe(
        &self,
        selector: &Selector,
        params: &EffectParams,
    ) -> Result<ApiResponse, AppError> {
        self.waveform(WaveformKind::Breathe, selector, params).await
    }

    pub async fn pulse(
        &self,
        selector: &Selector,
        params: &EffectParams,
    ) -> Result<ApiResponse, AppError> {
        self.waveform(WaveformKind::Pulse, selector, params).await
    }

    /// Flash the lights in the severity's signal color. Overrides are merged
    /// field by field over the severity defaults and sent as a pulse.
    /// Returns the parameters actually sent alongside the response.
    pub async fn alert_flash(
        &self,
        selector: &Selector,
        severity: Severity,
        overrides: EffectParams,
    ) -> Result<(EffectParams, ApiResponse), AppError> {
        let params = alert_params(severity, overrides);
        info!(
            %selector,
            %severity,
            color = params.color.as_deref().unwrap_or_default(),
            cycles = params.cycles.unwrap_or_default(),
            "dispatching alert flash"
        );
        let response = self.pulse(selector, &params).await?;
        Ok((params, response))
    }

    pub async fn activate_scene(
        &self,
        scene: &Uuid,
        activation: &SceneActivation,
    ) -> Result<ApiResponse, AppError> {
        activation.validate()?;
        self.client.activate_scene(scene, activation).await
    }

    async fn waveform(
        &self,
        kind: WaveformKind,
        selector: &Selector,
        params: &EffectParams,
    ) -> Result<ApiResponse, AppError> {
        params.validate(kind)?;
        self.client.waveform(kind, selector, params).await
    }
}

/// Scene ids are UUIDs; a `scene_id:` prefix is tolerated.
pub fn parse_scene_id(raw: &str) -> Result<Uuid, AppError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("scene_id:").unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(AppError::validation("scene id is required"));
    }
    Uuid::parse_str(trimmed).map_err(|_| {
        AppError::validation(format!(
            "Invalid scene id '{}': expected a UUID",
            raw.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_defaults_follow_policy() {
        let params = alert_defaults(Severity::High);
        assert_eq!(params.color.as_deref(), Some("orange"));
        assert_eq!(params.cycles, Some(7.0));
        assert_eq!(params.period, Some(ALERT_PERIOD_SECS));
        assert_eq!(params.power_on, Some(true));
        assert_eq!(params.persist, Some(false));
    }

    #[test]
    fn test_color_override_keeps_default_cycles() {
        let params = alert_params(
            Severity::Critical,
            EffectParams {
                color: Some("purple".into()),
                ..Default::default()
            },
        );
        assert_eq!(params.color.as_deref(), Some("purple"));
        assert_eq!(params.cycles, Some(10.0));
    }

    #[test]
    fn test_cycles_override_keeps_default_color() {
        let params = alert_params(
            Severity::Low,
            EffectParams {
                cycles: Some(1.0),
                ..Default::default()
            },
        );
        assert_eq!(params.color.as_deref(), Some("green"));
        assert_eq!(params.cycles, Some(1.0));
    }

    #[test]
    fn test_alert_params_are_valid_pulses() {
        for severity in Severity::ALL {
            assert!(alert_params(severity, EffectParams::default())
                .validate(WaveformKind::Pulse)
                .is_ok());
        }
    }

    #[test]
    fn test_parse_scene_id() {
        let id = "44f3d6c2-0d55-4b1c-8a3c-2b3f0e4f1a2b";
        assert_eq!(parse_scene_id(id).unwrap().to_string(), id);
        assert_eq!(
            parse_scene_id(&format!("scene_id:{id}")).unwrap().to_string(),
            id
        );
        assert!(parse_scene_id("").is_err());
        assert!(parse_scene_id("movie-night").is_err());
    }
}
