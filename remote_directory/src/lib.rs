//! # Remote Directory Client
//!
//! This crate implements an in-process directory that forwards every
//! operation over RPC to a remote directory server.
//!
//! ## Philosophy
//!
//! - **One session per identity**: A connection is dialed and authenticated
//!   once per (network address, user) pair and reused afterwards
//! - **No hidden global state**: The session cache belongs to a
//!   [`DirectoryClient`], not to the process
//! - **Errors are returned, not hidden**: Nothing is retried or suppressed;
//!   every failure reaches the caller as a [`DirectoryError`]
//!
//! ## Architecture
//!
//! - [`SessionRegistry`]: cache of authenticated sessions
//! - [`DirectoryClient::bind`]: finds or dials and authenticates a session
//! - [`Session`]: routes calls to `Server_<id>.<Method>` on the server
//! - [`Directory`]: the operations callers use
//!
//! ## Example
//!
//! ```ignore
//! use directory_types::{Context, Endpoint, PathName};
//! use remote_directory::{Directory, DirectoryClient};
//!
//! let client: DirectoryClient = DirectoryClient::default();
//! let session = client.bind(&Context::new("alice"), &Endpoint::remote("http://dir:8081"))?;
//! let entry = session.lookup(&PathName::new("alice/notes.txt"))?;
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod facade;
pub mod registry;
pub mod session;
pub mod tcp;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use client::DirectoryClient;
pub use config::ClientConfig;
pub use error::{DirectoryError, TransportError};
pub use facade::Directory;
pub use registry::SessionRegistry;
pub use session::Session;
pub use tcp::{TcpConnection, TcpDialer};
pub use transport::{Dialer, RpcConnection};

pub use directory_proto::SessionId;
