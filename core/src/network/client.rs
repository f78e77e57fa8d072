//! # miIO Client
//!
//! One UDP socket per device, connected to `host:54321`.
//!
//! A session starts with a hello handshake which tells the client the device id
//! and the device stamp. Every request then carries the last seen stamp plus one.
//! Requests are serialized: the session lock is held from sending a request
//! until its reply (or the final timeout).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::time::{Instant, timeout};
use tracing::debug;

use airfresh_common::config::{DEFAULT_RETRIES, DEFAULT_TIMEOUT};
use airfresh_common::token::Token;
use airfresh_protocols::message::{Request, Response};
use airfresh_protocols::packet::{self, Header};
use airfresh_protocols::MIIO_PORT;

use super::channel::MiioChannel;
use crate::error::DeviceError;

const RECV_BUFFER_SIZE: usize = 8192;
const MAX_REQUEST_ID: u32 = 9999;
const ID_COLLISION_BUMP: u32 = 100;
/// Reply code of a device that already saw the request id.
const ERROR_ID_COLLISION: i64 = -9999;

#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    handshaken: bool,
    device_id: u32,
    stamp: u32,
    last_id: u32,
}

impl Session {
    fn next_id(&mut self) -> u32 {
        self.last_id = if self.last_id >= MAX_REQUEST_ID { 1 } else { self.last_id + 1 };
        self.last_id
    }

    fn skip_ids(&mut self, count: u32) {
        self.last_id = (self.last_id + count) % MAX_REQUEST_ID;
    }
}

/// Identity reported by a device in its hello reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelloInfo {
    pub device_id: u32,
    pub stamp: u32,
}

pub struct MiioClient {
    addr: SocketAddr,
    token: Token,
    options: ClientOptions,
    socket: UdpSocket,
    session: Mutex<Session>,
}

impl MiioClient {
    /// Resolves `host` and opens a socket towards its miIO port.
    pub async fn connect(host: &str, token: Token, options: ClientOptions) -> Result<Self, DeviceError> {
        let addr: SocketAddr = tokio::net::lookup_host((host, MIIO_PORT))
            .await
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| DeviceError::Resolve { host: host.to_string() })?;
        Self::connect_addr(addr, token, options).await
    }

    pub async fn connect_addr(addr: SocketAddr, token: Token, options: ClientOptions) -> Result<Self, DeviceError> {
        let local: SocketAddr = match addr.ip() {
            IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let socket: UdpSocket = UdpSocket::bind(local).await?;
        socket.connect(addr).await?;

        Ok(Self {
            addr,
            token,
            options,
            socket,
            session: Mutex::new(Session::default()),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Performs a hello exchange and stores the device identity.
    pub async fn handshake(&self) -> Result<HelloInfo, DeviceError> {
        let mut session = self.session.lock().await;
        self.do_handshake(&mut session).await
    }

    /// Sends `method` with `params` and returns the reply's `result`.
    ///
    /// Timeouts are retried after a new handshake, an id collision is retried
    /// with a fresh id, both while `retries` remain.
    pub async fn send_command(&self, method: &str, params: Value) -> Result<Value, DeviceError> {
        let mut session = self.session.lock().await;
        let mut retries_left: u32 = self.options.retries;

        loop {
            match self.attempt(&mut session, method, &params).await {
                Ok(result) => return Ok(result),
                Err(DeviceError::Timeout { .. }) if retries_left > 0 => {
                    retries_left -= 1;
                    session.handshaken = false;
                    debug!("'{method}' to {} timed out, retrying ({retries_left} left)", self.addr);
                }
                Err(DeviceError::Device { code: ERROR_ID_COLLISION, .. }) if retries_left > 0 => {
                    retries_left -= 1;
                    session.skip_ids(ID_COLLISION_BUMP);
                    debug!("Request id collision on {}, skipping ahead", self.addr);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn do_handshake(&self, session: &mut Session) -> Result<HelloInfo, DeviceError> {
        self.socket.send(&packet::hello()).await?;

        let deadline: Instant = Instant::now() + self.options.timeout;
        let mut buffer: Vec<u8> = vec![0u8; RECV_BUFFER_SIZE];
        loop {
            let len: usize = self.recv_until(deadline, &mut buffer, "hello").await?;
            let header: Header = match Header::parse(&buffer[..len]) {
                Ok(header) if header.is_hello() => header,
                _ => continue,
            };

            session.handshaken = true;
            session.device_id = header.device_id;
            session.stamp = header.stamp;
            debug!(
                "Handshake with {}: device id {:#010x}, stamp {}",
                self.addr, header.device_id, header.stamp
            );
            return Ok(HelloInfo {
                device_id: header.device_id,
                stamp: header.stamp,
            });
        }
    }

    async fn attempt(&self, session: &mut Session, method: &str, params: &Value) -> Result<Value, DeviceError> {
        if !session.handshaken {
            self.do_handshake(session).await?;
        }

        let id: u32 = session.next_id();
        let request: Request = Request::new(id, method, params.clone());
        let packet: Vec<u8> = packet::encode(
            &self.token,
            session.device_id,
            session.stamp.wrapping_add(1),
            &request.to_bytes()?,
        )?;

        debug!("-> {} #{id} {method} {}", self.addr, request.params);
        self.socket.send(&packet).await?;

        let deadline: Instant = Instant::now() + self.options.timeout;
        let mut buffer: Vec<u8> = vec![0u8; RECV_BUFFER_SIZE];
        loop {
            let len: usize = self.recv_until(deadline, &mut buffer, method).await?;
            let (header, plaintext) = packet::decode(&self.token, &buffer[..len])?;
            if header.is_hello() {
                continue;
            }
            session.stamp = header.stamp;

            let response: Response = Response::from_bytes(&plaintext)?;
            if response.id != id {
                debug!("Dropping stale reply #{} while waiting for #{id}", response.id);
                continue;
            }

            if let Some(error) = response.error {
                return Err(DeviceError::Device {
                    code: error.code,
                    message: error.message,
                });
            }

            debug!("<- {} #{id} {:?}", self.addr, response.result);
            return response
                .result
                .ok_or_else(|| DeviceError::UnexpectedResponse("reply has neither result nor error".into()));
        }
    }

    async fn recv_until(&self, deadline: Instant, buffer: &mut [u8], method: &str) -> Result<usize, DeviceError> {
        let remaining: Duration = deadline.saturating_duration_since(Instant::now());
        match timeout(remaining, self.socket.recv(buffer)).await {
            Ok(received) => Ok(received?),
            Err(_elapsed) => Err(DeviceError::Timeout {
                method: method.to_string(),
            }),
        }
    }
}

#[async_trait]
impl MiioChannel for MiioClient {
    async fn send(&self, method: &str, params: Value) -> Result<Value, DeviceError> {
        self.send_command(method, params).await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
