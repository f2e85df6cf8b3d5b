use std::time::Instant;

use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::response::{parse_body, ApiResponse};
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::effect::{EffectParams, SceneActivation, StateChange, TogglePower, WaveformKind};
use crate::models::selector::Selector;

const USER_AGENT: &str = concat!("lifx-alert/", env!("CARGO_PKG_VERSION"));

/// Thin client for the LIFX Cloud HTTP API.
///
/// Every call is a single attempt: no retries are made, since the API is
/// rate limited and the caller decides whether to try again.
pub struct LifxClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    verify_tls: bool,
}

fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout()?)
        .danger_accept_invalid_certs(!config.verify_tls)
        .build()?)
}

impl LifxClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        config.validate()?;
        let token = config.token()?.to_string();
        if !config.verify_tls {
            warn!("TLS certificate verification is disabled");
        }

        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.clone(),
            token,
            verify_tls: config.verify_tls,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Send a request and return the response whatever its status. Only
    /// transport failures are errors here.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, body = ?body, "sending request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            let err = AppError::from(e);
            debug!(%method, %url, error = %err, "request failed");
            err
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response.text().await?;
        let elapsed = started.elapsed();

        debug!(
            %method,
            %url,
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "received response"
        );

        Ok(ApiResponse {
            status,
            headers,
            body: parse_body(&text),
            elapsed,
        })
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, AppError> {
        self.execute(method, path, body).await?.error_for_status()
    }

    async fn call_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, AppError> {
        let body = serde_json::to_value(body)
            .map_err(|e| AppError::validation(format!("Could not encode request: {}", e)))?;
        self.call(method, path, Some(body)).await
    }

    /// Raw probe used by diagnostics: the status is not checked.
    pub async fn probe(&self, selector: &Selector) -> Result<ApiResponse, AppError> {
        self.execute(Method::GET, &format!("/lights/{}", selector.path_segment()), None)
            .await
    }

    pub async fn list_lights(&self, selector: &Selector) -> Result<ApiResponse, AppError> {
        self.call(Method::GET, &format!("/lights/{}", selector.path_segment()), None)
            .await
    }

    pub async fn set_state(
        &self,
        selector: &Selector,
        change: &StateChange,
    ) -> Result<ApiResponse, AppError> {
        self.call_json(
            Method::PUT,
            &format!("/lights/{}/state", selector.path_segment()),
            change,
        )
        .await
    }

    pub async fn toggle_power(
        &self,
        selector: &Selector,
        toggle: &TogglePower,
    ) -> Result<ApiResponse, AppError> {
        self.call_json(
            Method::POST,
            &format!("/lights/{}/toggle", selector.path_segment()),
            toggle,
        )
        .await
    }

    pub async fn waveform(
        &self,
        kind: WaveformKind,
        selector: &Selector,
        params: &EffectParams,
    ) -> Result<ApiResponse, AppError> {
        self.call_json(
            Method::POST,
            &format!("/lights/{}/effects/{}", selector.path_segment(), kind.path()),
            params,
        )
        .await
    }

    pub async fn list_scenes(&self) -> Result<ApiResponse, AppError> {
        self.call(Method::GET, "/scenes", None).await
    }

    pub async fn activate_scene(
        &self,
        scene: &Uuid,
        activation: &SceneActivation,
    ) -> Result<ApiResponse, AppError> {
        self.call_json(
            Method::PUT,
            &format!("/scenes/scene_id:{}/activate", scene.hyphenated()),
            activation,
        )
        .await
    }
}
