//! Transport seam between the directory client and the RPC layer.
//!
//! The client never touches sockets directly: it asks a [`Dialer`] for an
//! [`RpcConnection`] and exchanges JSON values over it. [`crate::TcpDialer`]
//! is the production implementation; tests substitute fakes.

use crate::TransportError;
use serde_json::Value;

/// A live, reliable RPC connection
///
/// Implementations must be safe for concurrent use: one connection is
/// shared by every caller that reuses its session.
pub trait RpcConnection: Send + Sync {
    /// Invokes `service_method` (e.g. `"Server_7.Lookup"`) and blocks until
    /// the reply arrives
    fn call(&self, service_method: &str, params: Value) -> Result<Value, TransportError>;

    /// Releases the connection; later calls fail with [`TransportError::Closed`]
    fn close(&self);
}

/// Opens RPC connections to a network location (`host:port`)
pub trait Dialer: Send + Sync {
    fn dial(&self, location: &str) -> Result<Box<dyn RpcConnection>, TransportError>;
}
