//! # Directory Types
//!
//! This crate defines the value types shared by directory clients and servers.
//!
//! ## Philosophy
//!
//! - **Pass-through values**: Entries, paths and locations are marshaled, never interpreted
//! - **Typed, not stringly-typed**: User names and path names cannot be confused
//! - **Explicit identity**: The caller identity travels in a [`Context`], not in globals
//!
//! ## Key Types
//!
//! - [`Endpoint`]: Transport kind plus network address of a service
//! - [`DirEntry`]: A directory entry as stored by the directory server
//! - [`Location`]: Where the data for an entry lives
//! - [`Context`]: The identity a client acts as

pub mod context;
pub mod endpoint;
pub mod entry;
pub mod names;

pub use context::Context;
pub use endpoint::{Endpoint, EndpointParseError, NetAddr, Transport};
pub use entry::{DirEntry, Location, Metadata, Reference};
pub use names::{PathName, UserName};
