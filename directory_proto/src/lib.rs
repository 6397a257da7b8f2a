//! # Directory Protocol
//!
//! This crate defines the remote directory protocol: one typed request and
//! response record per operation, the service naming convention, and the
//! frames that carry calls over a connection.
//!
//! ## Service naming
//!
//! A server hosts one bootstrap service, `Server`, and one service per
//! authenticated session, `Server_<id>`. Every call except
//! `Authenticate` goes to the session service:
//!
//! ```text
//! Server.Authenticate      -> assigns <id>
//! Server_<id>.Lookup       -> per-session state on the server
//! ```

pub mod frame;
pub mod messages;

pub use frame::{CallId, RpcRequest, RpcResponse};
pub use messages::{
    AuthenticateRequest, AuthenticateResponse, DeleteRequest, DeleteResponse, GlobRequest,
    GlobResponse, LookupRequest, LookupResponse, MakeDirectoryRequest, MakeDirectoryResponse,
    PutRequest, PutResponse, WhichAccessRequest, WhichAccessResponse,
};

use std::fmt;

/// Name of the bootstrap service that authenticates users.
pub const BOOTSTRAP_SERVICE: &str = "Server";

/// Fully qualified name of the authentication call.
pub const AUTHENTICATE_METHOD: &str = "Server.Authenticate";

/// Method names of the per-session directory operations.
pub mod method {
    pub const GLOB: &str = "Glob";
    pub const MAKE_DIRECTORY: &str = "MakeDirectory";
    pub const PUT: &str = "Put";
    pub const WHICH_ACCESS: &str = "WhichAccess";
    pub const DELETE: &str = "Delete";
    pub const LOOKUP: &str = "Lookup";
}

/// Identifier the server assigns to an authenticated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SessionId(i64);

impl SessionId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Returns the fully qualified name of `method` on this session's service
    pub fn service_method(&self, method: &str) -> String {
        format!("{}_{}.{}", BOOTSTRAP_SERVICE, self.0, method)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
