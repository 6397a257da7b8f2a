//! Transport binder
//!
//! [`DirectoryClient::bind`] turns an endpoint into an authenticated
//! [`Session`], dialing and authenticating at most once per
//! (network address, user) pair for as long as the session stays
//! registered.

use crate::dispatch::authenticate;
use crate::{Dialer, Directory, DirectoryError, Session, SessionRegistry, TcpDialer};
use directory_types::{Context, Endpoint, NetAddr, Transport, UserName};
use std::sync::Arc;

/// Scheme prefix of the only supported address form.
const HTTP_PREFIX: &str = "http://";

/// Directory client state: a dialer plus the sessions it has established
///
/// One client is normally shared by the whole process; its registry lives
/// exactly as long as the client does.
pub struct DirectoryClient<D: Dialer = TcpDialer> {
    dialer: D,
    registry: SessionRegistry,
}

impl Default for DirectoryClient<TcpDialer> {
    fn default() -> Self {
        Self::new(TcpDialer)
    }
}

impl<D: Dialer> DirectoryClient<D> {
    /// Creates a client that opens connections through `dialer`
    pub fn new(dialer: D) -> Self {
        Self {
            dialer,
            registry: SessionRegistry::new(),
        }
    }

    /// Returns the session registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Returns an authenticated session for `context.user_name` at `endpoint`
    ///
    /// A registered session for the same address and user is returned as
    /// is. Otherwise the address is dialed, the user authenticated, and the
    /// new session registered. The registry lock is not held while dialing,
    /// so concurrent first binds for one key may each register a session.
    pub fn bind(
        &self,
        context: &Context,
        endpoint: &Endpoint,
    ) -> Result<Arc<Session>, DirectoryError> {
        if endpoint.transport != Transport::Remote {
            return Err(DirectoryError::UnsupportedTransport(endpoint.transport));
        }

        let user = &context.user_name;
        if let Some(session) = self.registry.find(&endpoint.net_addr, user) {
            log::debug!("reusing session {} for {} at {}", session.id(), user, endpoint);
            return Ok(session);
        }

        let location = parse_location(&endpoint.net_addr)?;
        let connection = self
            .dialer
            .dial(location)
            .map_err(|source| DirectoryError::Connection {
                location: location.to_string(),
                source,
            })?;

        let id = match authenticate(connection.as_ref(), user) {
            Ok(id) => id,
            Err(source) => {
                log::warn!("authentication of {} at {} failed: {}", user, endpoint, source);
                connection.close();
                return Err(DirectoryError::Authentication {
                    user: user.clone(),
                    source,
                });
            }
        };

        let session = Arc::new(Session::new(
            endpoint.clone(),
            user.clone(),
            id,
            connection,
        ));
        self.registry.insert(session.clone());
        log::info!("authenticated {} at {} as session {}", user, endpoint, id);
        Ok(session)
    }

    /// Like [`bind`](Self::bind), but hands the session out as a directory
    pub fn dial(
        &self,
        context: &Context,
        endpoint: &Endpoint,
    ) -> Result<Arc<dyn Directory>, DirectoryError> {
        let session: Arc<dyn Directory> = self.bind(context, endpoint)?;
        Ok(session)
    }

    /// Unregisters and closes every session for `user` at `endpoint`
    ///
    /// Returns the number of sessions closed. A later bind for the same key
    /// dials and authenticates afresh.
    pub fn close(&self, endpoint: &Endpoint, user: &UserName) -> usize {
        let evicted = self.registry.evict(&endpoint.net_addr, user);
        for session in &evicted {
            session.close();
        }
        evicted.len()
    }
}

/// Strips the `http://` scheme, leaving the `host:port` location to dial
fn parse_location(net_addr: &NetAddr) -> Result<&str, DirectoryError> {
    net_addr
        .as_str()
        .strip_prefix(HTTP_PREFIX)
        .ok_or_else(|| DirectoryError::UnrecognizedAddress(net_addr.clone()))
}
