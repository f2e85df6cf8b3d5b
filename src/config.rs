use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.lifx.com/v1";
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Markdown,
}

/// Connection settings handed over by the host platform.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub verify_tls: bool,
    pub timeout_secs: f64,
}

impl ApiConfig {
    pub fn new(base_url: &str, token: Option<String>, verify_tls: bool, timeout_secs: f64) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            verify_tls,
            timeout_secs,
        }
    }

    /// Request timeout; must be a finite, positive number of seconds that
    /// fits in a `Duration`.
    pub fn timeout(&self) -> Result<Duration, AppError> {
        let invalid = || {
            AppError::validation(format!(
                "Invalid timeout {}: expected a positive number of seconds",
                self.timeout_secs
            ))
        };
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(invalid());
        }
        Duration::try_from_secs_f64(self.timeout_secs).map_err(|_| invalid())
    }

    pub fn token(&self) -> Result<&str, AppError> {
        self.token.as_deref().ok_or_else(|| {
            AppError::validation("No API token configured. Pass --token or set LIFX_TOKEN.")
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            AppError::validation(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::validation(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        self.timeout()?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None, true, DEFAULT_TIMEOUT_SECS)
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
    pub verbose: bool,
    pub api: ApiConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ApiConfig::new("https://api.lifx.com/v1/", None, true, 5.0);
        assert_eq!(config.base_url, "https://api.lifx.com/v1");
    }

    #[test]
    fn test_blank_token_treated_as_missing() {
        let config = ApiConfig::new(DEFAULT_BASE_URL, Some("  ".into()), true, 5.0);
        let err = config.token().unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_timeout_converts_to_duration() {
        let config = ApiConfig::new(DEFAULT_BASE_URL, None, true, 2.5);
        assert_eq!(config.timeout().unwrap(), Duration::from_millis(2500));
    }

    #[test]
    fn test_out_of_range_timeout_is_a_validation_error() {
        for secs in [1e30, -1.0, 0.0, f64::NAN, f64::INFINITY] {
            let config = ApiConfig::new(DEFAULT_BASE_URL, Some("t".into()), true, secs);
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind(), "validation", "timeout={secs}");
            assert!(err.to_string().contains("timeout"), "timeout={secs}");
        }
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        assert!(ApiConfig::new("ftp://example.com", None, true, 5.0)
            .validate()
            .is_err());
        assert!(ApiConfig::new("not a url", None, true, 5.0)
            .validate()
            .is_err());
        assert!(ApiConfig::default().validate().is_ok());
    }
}
