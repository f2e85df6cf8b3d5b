use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: Option<String>,
}

/// A light as returned by `GET /lights/{selector}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Light {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub connected: Option<bool>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub brightness: Option<f64>,
    #[serde(default)]
    pub group: Option<NamedRef>,
    #[serde(default)]
    pub location: Option<NamedRef>,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl Light {
    pub fn label_or_id(&self) -> &str {
        self.label
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn group_name(&self) -> &str {
        self.group
            .as_ref()
            .and_then(|g| g.name.as_deref())
            .unwrap_or("")
    }

    pub fn location_name(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .unwrap_or("")
    }

    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("")
    }
}

/// A scene as returned by `GET /scenes`. Timestamps are epoch seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub states: Vec<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Per-device outcome inside an effect or state-change response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl DeviceResult {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }
}

/// Decode a listing body. A single object is treated as a one-element list;
/// entries that do not decode are skipped.
pub fn list_from_json<T: for<'de> Deserialize<'de>>(body: &serde_json::Value) -> Vec<T> {
    match body {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        serde_json::Value::Object(_) => serde_json::from_value(body.clone())
            .ok()
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract the `results` array of an effect/state response.
pub fn device_results(body: &serde_json::Value) -> Vec<DeviceResult> {
    body.get("results")
        .map(list_from_json::<DeviceResult>)
        .unwrap_or_default()
}
