//! Error taxonomy for binding and calling remote directories.

use directory_types::{NetAddr, Transport, UserName};
use thiserror::Error;

/// Failure of a single exchange on an RPC connection
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Error string returned by the server, unchanged
    #[error("{0}")]
    Remote(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection closed")]
    Closed,
}

/// Errors surfaced to directory callers
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Endpoint names a transport this client does not speak
    #[error("remote: unrecognized transport {0}")]
    UnsupportedTransport(Transport),

    /// Network address is not of the form `http://host:port`
    #[error("unrecognized net address in remote: {:?}", .0.as_str())]
    UnrecognizedAddress(NetAddr),

    /// Dialing the server failed
    #[error("dial {location}: {source}")]
    Connection {
        location: String,
        #[source]
        source: TransportError,
    },

    /// The server did not accept the user
    #[error("authenticate {user}: {source}")]
    Authentication {
        user: UserName,
        #[source]
        source: TransportError,
    },

    /// A call on an authenticated session failed
    #[error("{method}: {source}")]
    RemoteCall {
        method: String,
        #[source]
        source: TransportError,
    },
}

impl DirectoryError {
    /// Returns the transport-level cause, if any
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            DirectoryError::Connection { source, .. }
            | DirectoryError::Authentication { source, .. }
            | DirectoryError::RemoteCall { source, .. } => Some(source),
            DirectoryError::UnsupportedTransport(_) | DirectoryError::UnrecognizedAddress(_) => {
                None
            }
        }
    }
}
