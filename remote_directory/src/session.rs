//! Authenticated sessions.

use crate::RpcConnection;
use directory_proto::SessionId;
use directory_types::{Endpoint, NetAddr, UserName};
use std::fmt;

/// An authenticated connection to one remote directory server for one user
///
/// A session only exists after a successful handshake; its identifier is
/// assigned by the server at that point and never changes. Sessions are
/// shared read-only between all callers that bind the same key.
pub struct Session {
    endpoint: Endpoint,
    user_name: UserName,
    id: SessionId,
    pub(crate) connection: Box<dyn RpcConnection>,
}

impl Session {
    pub(crate) fn new(
        endpoint: Endpoint,
        user_name: UserName,
        id: SessionId,
        connection: Box<dyn RpcConnection>,
    ) -> Self {
        Self {
            endpoint,
            user_name,
            id,
            connection,
        }
    }

    /// Returns the user this session is authenticated as
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Returns the server-assigned session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Checks whether this session serves `user` at `net_addr`
    pub fn matches(&self, net_addr: &NetAddr, user: &UserName) -> bool {
        self.endpoint.net_addr == *net_addr && self.user_name == *user
    }

    /// Releases the underlying connection
    ///
    /// Only called once the session is out of the registry, so a later
    /// bind never hands out a closed session.
    pub(crate) fn close(&self) {
        log::info!("closing session {} for {}", self.id, self.user_name);
        self.connection.close();
    }

    pub(crate) fn endpoint_ref(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("user_name", &self.user_name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
