//! Frames carried over an RPC connection
//!
//! A connection exchanges one request frame and one response frame per
//! call. The response echoes the request's [`CallId`] so a client can
//! detect a desynchronized stream.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(Uuid);

impl CallId {
    /// Creates a new random call ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Call({})", self.0)
    }
}

/// A call to `method` (fully qualified, e.g. `"Server_7.Lookup"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: CallId,
    pub method: String,
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            id: CallId::new(),
            method: method.into(),
            params,
        }
    }
}

/// Reply to an [`RpcRequest`]
///
/// Exactly one of `result` and `error` is meaningful: a present `error`
/// means the server rejected or failed the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: CallId,
    #[serde(default)]
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RpcResponse {
    /// Creates a successful reply
    pub fn ok(id: CallId, result: Value) -> Self {
        Self {
            id,
            result,
            error: None,
        }
    }

    /// Creates a failed reply
    pub fn error(id: CallId, error: impl Into<String>) -> Self {
        Self {
            id,
            result: Value::Null,
            error: Some(error.into()),
        }
    }

    /// Converts the reply into the call outcome
    pub fn into_result(self) -> Result<Value, String> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}
