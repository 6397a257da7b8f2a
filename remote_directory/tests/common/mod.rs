//! A minimal directory server speaking the TCP frame protocol.

use directory_proto::{RpcRequest, RpcResponse, AUTHENTICATE_METHOD};
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
pub struct Shared {
    pub next_id: AtomicI64,
    pub connections: AtomicUsize,
    pub silent: AtomicBool,
    pub calls: Mutex<Vec<String>>,
    pub sessions: Mutex<Vec<(i64, String)>>,
}

pub struct TestServer {
    pub addr: String,
    pub shared: Arc<Shared>,
}

impl TestServer {
    /// Starts a server on an ephemeral port; session IDs start at `first_id`.
    pub fn start(first_id: i64) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let addr = listener.local_addr().expect("local addr").to_string();
        let shared = Arc::new(Shared::default());
        shared.next_id.store(first_id, Ordering::SeqCst);

        let accept_shared = shared.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                accept_shared.connections.fetch_add(1, Ordering::SeqCst);
                let shared = accept_shared.clone();
                thread::spawn(move || serve(stream, shared));
            }
        });

        Self { addr, shared }
    }

    pub fn net_addr(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<String> {
        self.shared.calls.lock().unwrap().clone()
    }

    /// Stops answering session calls; authentication still succeeds.
    pub fn go_silent(&self) {
        self.shared.silent.store(true, Ordering::SeqCst);
    }

    pub fn connections(&self) -> usize {
        self.shared.connections.load(Ordering::SeqCst)
    }
}

fn serve(stream: TcpStream, shared: Arc<Shared>) {
    let mut writer = stream.try_clone().expect("clone stream");
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    reader.read_line(&mut line).expect("read CONNECT");
    if !line.starts_with("CONNECT /_rpc_ ") {
        let _ = writer.write_all(b"HTTP/1.0 405 Method Not Allowed\n\n");
        return;
    }
    line.clear();
    reader.read_line(&mut line).expect("read blank line");
    writer
        .write_all(b"HTTP/1.0 200 Connected to RPC\n\n")
        .expect("write status");

    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let request: RpcRequest = serde_json::from_str(&line).expect("decode request");
        shared.calls.lock().unwrap().push(request.method.clone());
        if shared.silent.load(Ordering::SeqCst) && request.method != AUTHENTICATE_METHOD {
            continue;
        }

        let response = match handle(&shared, &request.method, &request.params) {
            Ok(result) => RpcResponse::ok(request.id, result),
            Err(error) => RpcResponse::error(request.id, error),
        };
        let mut frame = serde_json::to_vec(&response).expect("encode response");
        frame.push(b'\n');
        if writer.write_all(&frame).is_err() {
            return;
        }
    }
}

fn handle(shared: &Shared, method: &str, params: &Value) -> Result<Value, String> {
    if method == AUTHENTICATE_METHOD {
        let user = params["UserName"].as_str().unwrap_or_default();
        if user == "mallory" {
            return Err(format!("unknown user {}", user));
        }
        let id = shared.next_id.fetch_add(1, Ordering::SeqCst);
        shared.sessions.lock().unwrap().push((id, user.to_string()));
        return Ok(json!({ "ID": id }));
    }

    let (service, op) = method
        .split_once('.')
        .ok_or_else(|| format!("malformed method {}", method))?;
    let id: i64 = service
        .strip_prefix("Server_")
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| format!("can't find service {}", service))?;
    let user = shared
        .sessions
        .lock()
        .unwrap()
        .iter()
        .find(|(session, _)| *session == id)
        .map(|(_, user)| user.clone())
        .ok_or_else(|| format!("can't find service {}", service))?;

    match op {
        "Lookup" => {
            let name = params["Name"].as_str().unwrap_or_default();
            if name.ends_with("missing") {
                return Err(format!("{}: item does not exist", name));
            }
            Ok(json!({ "Entry": entry(name, &user) }))
        }
        "Glob" => {
            let pattern = params["Pattern"].as_str().unwrap_or_default();
            let prefix = pattern.trim_end_matches('*');
            Ok(json!({ "Entries": [entry(&format!("{}one", prefix), &user)] }))
        }
        "MakeDirectory" => Ok(json!({
            "Location": {
                "Endpoint": { "Transport": "remote", "NetAddr": "http://store:9000" },
                "Reference": params["Name"].clone(),
            }
        })),
        "WhichAccess" => Ok(json!({ "Name": format!("{}/Access", user) })),
        "Put" | "Delete" => Ok(json!({})),
        other => Err(format!("unknown method {}", other)),
    }
}

fn entry(name: &str, owner: &str) -> Value {
    json!({
        "Name": name,
        "Location": {
            "Endpoint": { "Transport": "remote", "NetAddr": "http://store:9000" },
            "Reference": format!("{}:{}", owner, name),
        },
        "Metadata": {
            "IsDir": false,
            "Sequence": 1,
            "Size": 5,
            "Time": 0,
            "Packdata": [],
        },
    })
}
