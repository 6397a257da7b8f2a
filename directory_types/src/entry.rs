//! Directory entries and data locations
//!
//! These records cross the client/server boundary unchanged. Clients
//! marshal them; only the directory server gives them meaning.

use crate::{Endpoint, PathName};
use serde::{Deserialize, Serialize};

/// Server-specific key identifying a blob within a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where the data for an entry is stored
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub endpoint: Endpoint,
    pub reference: Reference,
}

/// Descriptive fields of a directory entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metadata {
    pub is_dir: bool,
    pub sequence: i64,
    pub size: u64,
    pub time: i64,
    /// Packing-specific data, opaque to the directory
    pub packdata: Vec<u8>,
}

/// A single entry in a directory tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirEntry {
    pub name: PathName,
    pub location: Location,
    pub metadata: Metadata,
}
