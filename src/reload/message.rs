//! Live Reload Message Protocol
//!
//! Defines the JSON message format for WebSocket communication between
//! the presentation server and browser clients.

use serde::{Deserialize, Serialize};

/// Reload message sent over WebSocket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadMessage {
    /// Full page reload, with the changed file path as a hint
    Reload {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },

    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },
}

impl ReloadMessage {
    /// Create a reload message for a changed path
    pub fn reload(path: impl Into<String>) -> Self {
        Self::Reload {
            path: Some(path.into()),
        }
    }

    /// Create a connected message
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload"}"#.to_string())
    }

    /// Parse from JSON string
    #[allow(dead_code)] // Used by tests; the browser is the usual consumer
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_serialization() {
        let msg = ReloadMessage::reload("slides/dais.html");
        let json = msg.to_json();
        assert!(json.contains(r#""type":"reload""#));
        assert!(json.contains(r#""path":"slides/dais.html""#));

        match ReloadMessage::from_json(&json).unwrap() {
            ReloadMessage::Reload { path } => {
                assert_eq!(path.as_deref(), Some("slides/dais.html"));
            }
            other => panic!("expected Reload, got {other:?}"),
        }
    }

    #[test]
    fn test_connected_carries_version() {
        let json = ReloadMessage::connected().to_json();
        assert!(json.contains(r#""type":"connected""#));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }
}
