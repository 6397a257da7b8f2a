//! Client configuration
//!
//! Configuration is explicit: callers load it from JSON they obtained
//! themselves. Nothing is read from the environment or from fixed paths.
//!
//! ```json
//! { "user_name": "alice@example.com", "directory": "remote,http://dir:8081" }
//! ```

use directory_types::{Context, Endpoint, UserName};
use serde::{Deserialize, Serialize};

/// Who the client acts as and which directory it talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub user_name: UserName,
    #[serde(with = "endpoint_text")]
    pub directory: Endpoint,
}

impl ClientConfig {
    /// Parses a configuration from JSON
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serializes the configuration to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns the identity to bind with
    pub fn context(&self) -> Context {
        Context::new(self.user_name.clone())
    }
}

/// Endpoints are written as `"<transport>,<netaddr>"` in configuration.
mod endpoint_text {
    use directory_types::Endpoint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(endpoint: &Endpoint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(endpoint)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Endpoint, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
