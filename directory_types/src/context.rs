//! Caller identity

use crate::UserName;
use serde::{Deserialize, Serialize};

/// Identity a client acts as when it binds to a service
///
/// Unlike an ambient process user, the context is passed explicitly to
/// every bind so two identities can share one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub user_name: UserName,
}

impl Context {
    /// Creates a context for the given user
    pub fn new(user_name: impl Into<UserName>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}
