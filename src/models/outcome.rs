use serde::Serialize;

use crate::api::response::ApiResponse;
use crate::models::light::{device_results, list_from_json, DeviceResult, Light, Scene};
use crate::models::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SetState,
    TogglePower,
    Breathe,
    Pulse,
    AlertFlash,
    ActivateScene,
}

impl Operation {
    pub fn title(&self) -> &'static str {
        match self {
            Operation::SetState => "Set State",
            Operation::TogglePower => "Toggle Power",
            Operation::Breathe => "Breathe Effect",
            Operation::Pulse => "Pulse Effect",
            Operation::AlertFlash => "Alert Flash",
            Operation::ActivateScene => "Scene Activation",
        }
    }

    /// Context path the host platform stores the result under.
    pub fn context_key(&self) -> &'static str {
        match self {
            Operation::SetState => "LIFX.State",
            Operation::TogglePower => "LIFX.Toggle",
            Operation::Breathe => "LIFX.Breathe",
            Operation::Pulse => "LIFX.Pulse",
            Operation::AlertFlash => "LIFX.AlertFlash",
            Operation::ActivateScene => "LIFX.SceneActivation",
        }
    }
}

/// Result of a state-changing call, surfaced as the API reported it.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub operation: Operation,
    pub target: String,
    pub status: u16,
    pub latency_ms: u64,
    pub results: Vec<DeviceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub raw: serde_json::Value,
}

impl DispatchOutcome {
    pub fn new(operation: Operation, target: impl Into<String>, response: &ApiResponse) -> Self {
        Self {
            operation,
            target: target.into(),
            status: response.status,
            latency_ms: response.latency_ms() as u64,
            results: device_results(&response.body),
            detail: None,
            raw: response.body.clone(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn ok_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// False when some devices did not acknowledge (e.g. `timed_out`, `offline`).
    pub fn is_complete(&self) -> bool {
        self.ok_count() == self.results.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LightList {
    pub selector: Selector,
    pub lights: Vec<Light>,
    pub raw: serde_json::Value,
}

impl LightList {
    pub fn new(selector: Selector, response: &ApiResponse) -> Self {
        Self {
            selector,
            lights: list_from_json(&response.body),
            raw: response.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneList {
    pub scenes: Vec<Scene>,
    pub raw: serde_json::Value,
}

impl SceneList {
    pub fn new(response: &ApiResponse) -> Self {
        Self {
            scenes: list_from_json(&response.body),
            raw: response.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::header::HeaderMap;
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status,
            headers: HeaderMap::new(),
            body,
            elapsed: Duration::from_millis(120),
        }
    }

    #[test]
    fn test_partial_application_is_reported() {
        let outcome = DispatchOutcome::new(
            Operation::SetState,
            "group:Lounge",
            &response(
                207,
                json!({"results": [
                    {"id": "d073d5000001", "label": "Left Lamp", "status": "ok"},
                    {"id": "d073d5000002", "label": "Right Lamp", "status": "offline"}
                ]}),
            ),
        );
        assert_eq!(outcome.status, 207);
        assert_eq!(outcome.latency_ms, 120);
        assert_eq!(outcome.ok_count(), 1);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_empty_body_is_complete() {
        let outcome = DispatchOutcome::new(
            Operation::SetState,
            "all",
            &response(202, serde_json::Value::Null),
        );
        assert!(outcome.results.is_empty());
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_scene_list_from_response() {
        let list = SceneList::new(&response(
            200,
            json!([{"uuid": "44f3d6c2-0d55-4b1c-8a3c-2b3f0e4f1a2b", "name": "Red Alert", "updated_at": 1700000000}]),
        ));
        assert_eq!(list.scenes.len(), 1);
        assert_eq!(list.scenes[0].name.as_deref(), Some("Red Alert"));
    }
}
