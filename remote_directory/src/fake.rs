//! In-memory stand-in for a remote directory server, for unit tests.

use crate::{Dialer, RpcConnection, TransportError};
use directory_proto::AUTHENTICATE_METHOD;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Mutex};

#[derive(Default)]
struct State {
    calls: Vec<(String, Value)>,
    dials: Vec<String>,
    handshakes: usize,
    closed: usize,
    next_id: i64,
    replies: HashMap<String, Value>,
    failures: HashMap<String, String>,
    rejected_users: HashSet<String>,
    refuse_dials: bool,
    dial_barrier: Option<Arc<Barrier>>,
}

#[derive(Clone)]
pub(crate) struct FakeServer {
    state: Arc<Mutex<State>>,
}

impl FakeServer {
    pub(crate) fn new() -> Self {
        let state = State {
            next_id: 1,
            ..State::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub(crate) fn connection(&self) -> Box<dyn RpcConnection> {
        Box::new(FakeConnection {
            state: self.state.clone(),
            closed: AtomicBool::new(false),
        })
    }

    pub(crate) fn dialer(&self) -> FakeDialer {
        FakeDialer {
            server: self.clone(),
        }
    }

    pub(crate) fn respond(&self, method: &str, reply: Value) {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(method.to_string(), reply);
    }

    pub(crate) fn fail(&self, method: &str, error: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(method.to_string(), error.to_string());
    }

    pub(crate) fn set_next_id(&self, id: i64) {
        self.state.lock().unwrap().next_id = id;
    }

    pub(crate) fn reject_user(&self, user: &str) {
        self.state
            .lock()
            .unwrap()
            .rejected_users
            .insert(user.to_string());
    }

    pub(crate) fn accept_user(&self, user: &str) {
        self.state.lock().unwrap().rejected_users.remove(user);
    }

    pub(crate) fn refuse_dials(&self, refuse: bool) {
        self.state.lock().unwrap().refuse_dials = refuse;
    }

    /// Makes every dial wait until `barrier` is full.
    pub(crate) fn hold_dials(&self, barrier: Arc<Barrier>) {
        self.state.lock().unwrap().dial_barrier = Some(barrier);
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }

    pub(crate) fn dials(&self) -> Vec<String> {
        self.state.lock().unwrap().dials.clone()
    }

    pub(crate) fn handshakes(&self) -> usize {
        self.state.lock().unwrap().handshakes
    }

    pub(crate) fn closed(&self) -> usize {
        self.state.lock().unwrap().closed
    }
}

pub(crate) struct FakeDialer {
    server: FakeServer,
}

impl Dialer for FakeDialer {
    fn dial(&self, location: &str) -> Result<Box<dyn RpcConnection>, TransportError> {
        let barrier = self.server.state.lock().unwrap().dial_barrier.clone();
        if let Some(barrier) = barrier {
            barrier.wait();
        }
        {
            let mut state = self.server.state.lock().unwrap();
            state.dials.push(location.to_string());
            if state.refuse_dials {
                return Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }
        }
        Ok(self.server.connection())
    }
}

struct FakeConnection {
    state: Arc<Mutex<State>>,
    closed: AtomicBool,
}

impl RpcConnection for FakeConnection {
    fn call(&self, service_method: &str, params: Value) -> Result<Value, TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push((service_method.to_string(), params.clone()));

        if service_method == AUTHENTICATE_METHOD {
            state.handshakes += 1;
            let user = params["UserName"].as_str().unwrap_or_default();
            if state.rejected_users.contains(user) {
                return Err(TransportError::Remote(format!("unknown user {}", user)));
            }
            let id = state.next_id;
            state.next_id += 1;
            return Ok(json!({ "ID": id }));
        }

        if let Some(error) = state.failures.get(service_method) {
            return Err(TransportError::Remote(error.clone()));
        }
        Ok(state
            .replies
            .get(service_method)
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.state.lock().unwrap().closed += 1;
        }
    }
}
