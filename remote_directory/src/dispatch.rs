//! Call dispatch: typed requests in, typed responses out.
//!
//! Session calls go to `Server_<id>.<Method>`; authentication always goes
//! to `Server.Authenticate` because no session exists yet when it runs.

use crate::{DirectoryError, RpcConnection, Session, TransportError};
use directory_proto::{AuthenticateRequest, AuthenticateResponse, SessionId, AUTHENTICATE_METHOD};
use directory_types::UserName;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

impl Session {
    /// Invokes `method` on this session's server-side service
    pub fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, DirectoryError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let service_method = self.id().service_method(method);
        log::trace!("{} calling {}", self.user_name(), service_method);
        invoke(self.connection.as_ref(), &service_method, request).map_err(|source| {
            DirectoryError::RemoteCall {
                method: service_method,
                source,
            }
        })
    }

    /// Asks the server to authenticate `user` on this session's connection
    ///
    /// The call targets the bootstrap service regardless of this session's
    /// identifier, and the session itself is left unchanged.
    pub fn authenticate(&self, user: &UserName) -> Result<SessionId, DirectoryError> {
        authenticate(self.connection.as_ref(), user).map_err(|source| {
            DirectoryError::Authentication {
                user: user.clone(),
                source,
            }
        })
    }
}

/// Performs the bootstrap `Server.Authenticate` call for `user`
pub fn authenticate(
    connection: &dyn RpcConnection,
    user: &UserName,
) -> Result<SessionId, TransportError> {
    let request = AuthenticateRequest {
        user_name: user.clone(),
    };
    let response: AuthenticateResponse = invoke(connection, AUTHENTICATE_METHOD, &request)?;
    Ok(response.id)
}

fn invoke<Req, Resp>(
    connection: &dyn RpcConnection,
    service_method: &str,
    request: &Req,
) -> Result<Resp, TransportError>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let params = serde_json::to_value(request)?;
    let mut result = connection.call(service_method, params)?;
    // Servers may omit the body of empty replies.
    if result.is_null() {
        result = Value::Object(Map::new());
    }
    Ok(serde_json::from_value(result)?)
}
