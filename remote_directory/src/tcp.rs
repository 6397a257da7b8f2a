//! RPC over an HTTP-upgraded TCP stream.
//!
//! The client opens a TCP connection, sends `CONNECT /_rpc_ HTTP/1.0`, and
//! waits for a `200` status. After that the stream carries newline-delimited
//! JSON frames: one [`RpcRequest`] followed by one [`RpcResponse`] per call.

use crate::{Dialer, RpcConnection, TransportError};
use directory_proto::{RpcRequest, RpcResponse};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Path requested by the HTTP upgrade.
pub const RPC_PATH: &str = "/_rpc_";

/// Dials remote directory servers over TCP
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    fn dial(&self, location: &str) -> Result<Box<dyn RpcConnection>, TransportError> {
        Ok(Box::new(TcpConnection::connect(location)?))
    }
}

struct Stream {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

/// An established RPC connection
///
/// Calls are serialized: the stream is held for the whole request/response
/// exchange, so concurrent callers queue behind one another. Closing does
/// not wait for that lock; it shuts the socket down through a separate
/// handle, which fails any exchange still blocked on it.
pub struct TcpConnection {
    location: String,
    stream: Mutex<Stream>,
    shutdown: TcpStream,
    closed: AtomicBool,
}

impl TcpConnection {
    /// Connects to `location` and performs the HTTP upgrade
    pub fn connect(location: &str) -> Result<Self, TransportError> {
        let mut writer = TcpStream::connect(location)?;
        write!(writer, "CONNECT {} HTTP/1.0\n\n", RPC_PATH)?;
        writer.flush()?;

        let mut reader = BufReader::new(writer.try_clone()?);
        let status = read_line(&mut reader)?;
        if !is_ok_status(&status) {
            return Err(TransportError::Protocol(format!(
                "unexpected HTTP response: {}",
                status.trim()
            )));
        }
        // Skip headers up to the blank line.
        loop {
            if read_line(&mut reader)?.trim().is_empty() {
                break;
            }
        }

        log::debug!("connected to {}", location);
        let shutdown = writer.try_clone()?;
        Ok(Self {
            location: location.to_string(),
            stream: Mutex::new(Stream { reader, writer }),
            shutdown,
            closed: AtomicBool::new(false),
        })
    }

    /// Returns the `host:port` this connection was dialed against
    pub fn location(&self) -> &str {
        &self.location
    }

    fn exchange(&self, service_method: &str, params: Value) -> Result<Value, TransportError> {
        let mut stream = self
            .stream
            .lock()
            .map_err(|_| TransportError::Protocol("connection lock poisoned".to_string()))?;
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        let request = RpcRequest::new(service_method, params);
        let mut frame = serde_json::to_vec(&request)?;
        frame.push(b'\n');
        stream.writer.write_all(&frame)?;
        stream.writer.flush()?;

        let line = read_line(&mut stream.reader)?;
        let response: RpcResponse = serde_json::from_str(&line)?;
        if response.id != request.id {
            return Err(TransportError::Protocol(format!(
                "response {} does not match request {}",
                response.id, request.id
            )));
        }
        response.into_result().map_err(TransportError::Remote)
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl RpcConnection for TcpConnection {
    fn call(&self, service_method: &str, params: Value) -> Result<Value, TransportError> {
        match self.exchange(service_method, params) {
            // A shutdown under a pending exchange surfaces as EOF or an I/O error.
            Err(_) if self.is_closed() => Err(TransportError::Closed),
            result => result,
        }
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        // The peer may already be gone; nothing useful to report.
        let _ = self.shutdown.shutdown(Shutdown::Both);
        log::debug!("closed connection to {}", self.location);
    }
}

fn read_line(reader: &mut BufReader<TcpStream>) -> Result<String, TransportError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(TransportError::Closed);
    }
    Ok(line)
}

fn is_ok_status(line: &str) -> bool {
    let mut parts = line.split_whitespace();
    matches!(
        (parts.next(), parts.next()),
        (Some(version), Some("200")) if version.starts_with("HTTP/1.")
    )
}
