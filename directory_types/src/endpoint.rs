//! Service endpoints
//!
//! An endpoint names *where* a service lives: the transport used to reach
//! it and, for network transports, its address. On the wire an endpoint is
//! a `{Transport, NetAddr}` record. Configuration uses the textual form
//! `"<transport>,<netaddr>"`, e.g. `"remote,http://dir.example.com:8081"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Transport kind used to reach a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// No transport has been chosen
    #[default]
    Unassigned,
    /// Service runs in the caller's address space
    InProcess,
    /// Service is reached over the network through RPC
    Remote,
    /// Service is backed by Google Cloud Platform storage
    Gcp,
}

impl Transport {
    /// Returns the canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Unassigned => "unassigned",
            Transport::InProcess => "inprocess",
            Transport::Remote => "remote",
            Transport::Gcp => "gcp",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unassigned" => Ok(Transport::Unassigned),
            "inprocess" => Ok(Transport::InProcess),
            "remote" => Ok(Transport::Remote),
            "gcp" => Ok(Transport::Gcp),
            other => Err(EndpointParseError::UnknownTransport(other.to_string())),
        }
    }
}

/// Network address of a service, e.g. `"http://localhost:8081"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetAddr(String);

impl NetAddr {
    /// Creates a network address
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Returns the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether no address is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NetAddr {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NetAddr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Errors produced while parsing an endpoint from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointParseError {
    #[error("unknown transport: {0:?}")]
    UnknownTransport(String),

    #[error("endpoint is empty")]
    Empty,

    #[error("transport {0} requires a network address")]
    MissingAddress(Transport),
}

/// Transport kind and network address of a service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Endpoint {
    pub transport: Transport,
    pub net_addr: NetAddr,
}

impl Endpoint {
    /// Creates an endpoint
    pub fn new(transport: Transport, net_addr: impl Into<NetAddr>) -> Self {
        Self {
            transport,
            net_addr: net_addr.into(),
        }
    }

    /// Creates a remote endpoint for the given address
    pub fn remote(net_addr: impl Into<NetAddr>) -> Self {
        Self::new(Transport::Remote, net_addr)
    }

    /// Creates an in-process endpoint, which carries no address
    pub fn in_process() -> Self {
        Self::new(Transport::InProcess, NetAddr::default())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.net_addr.is_empty() {
            write!(f, "{}", self.transport)
        } else {
            write!(f, "{},{}", self.transport, self.net_addr)
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EndpointParseError::Empty);
        }
        let (transport, addr) = match s.split_once(',') {
            Some((transport, addr)) => (transport.parse()?, addr),
            None => (s.parse()?, ""),
        };
        if transport == Transport::Remote && addr.is_empty() {
            return Err(EndpointParseError::MissingAddress(transport));
        }
        Ok(Endpoint::new(transport, addr))
    }
}
