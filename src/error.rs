use std::error::Error as _;

/// How an outbound call failed before any HTTP response was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Connect,
    Tls,
    Other,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Timeout => "timeout",
            TransportKind::Connect => "connect",
            TransportKind::Tls => "tls",
            TransportKind::Other => "other",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Transport error ({kind}): {message}")]
    Transport { kind: TransportKind, message: String },

    #[error("LIFX API error {status}: {message}")]
    Application { status: u16, message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 2,
            AppError::Transport { .. } => 3,
            AppError::Application { .. } => 1,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Transport { .. } => "transport",
            AppError::Application { .. } => "application",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            AppError::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        match self {
            AppError::Application { status, .. } => {
                obj["status"] = serde_json::json!(status);
            }
            AppError::Transport { kind, .. } => {
                obj["transport"] = serde_json::json!(kind.as_str());
            }
            AppError::Validation(_) => {}
        }
        obj
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display hides the cause ("error sending request"), so walk the chain.
        let mut message = err.to_string();
        let mut source = err.source();
        let mut tls = false;
        while let Some(cause) = source {
            let text = cause.to_string();
            let lower = text.to_lowercase();
            if lower.contains("certificate") || lower.contains("tls") || lower.contains("handshake")
            {
                tls = true;
            }
            message.push_str(": ");
            message.push_str(&text);
            source = cause.source();
        }

        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if tls {
            TransportKind::Tls
        } else if err.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };

        AppError::Transport { kind, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let validation = AppError::validation("bad selector");
        let transport = AppError::Transport {
            kind: TransportKind::Connect,
            message: "connection refused".into(),
        };
        let application = AppError::Application {
            status: 401,
            message: "Bad token".into(),
        };

        assert_eq!(validation.kind(), "validation");
        assert_eq!(transport.kind(), "transport");
        assert_eq!(application.kind(), "application");
    }

    #[test]
    fn test_to_json_includes_status_for_application_errors() {
        let err = AppError::Application {
            status: 404,
            message: "Could not find selector".into(),
        };
        let json = err.to_json();
        assert_eq!(json["error"], "application");
        assert_eq!(json["status"], 404);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("Could not find selector"));
    }

    #[test]
    fn test_to_json_includes_transport_kind() {
        let err = AppError::Transport {
            kind: TransportKind::Timeout,
            message: "operation timed out".into(),
        };
        let json = err.to_json();
        assert_eq!(json["error"], "transport");
        assert_eq!(json["transport"], "timeout");
        assert!(json.get("status").is_none());
        assert!(err.is_timeout());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::validation("x").exit_code(), 2);
        assert_eq!(
            AppError::Application {
                status: 500,
                message: String::new()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            AppError::Transport {
                kind: TransportKind::Other,
                message: String::new()
            }
            .exit_code(),
            3
        );
    }
}
