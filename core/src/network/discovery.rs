//! # LAN Discovery
//!
//! Sends one hello packet (usually to the broadcast address) and collects every
//! hello reply that arrives within the listening window. Devices that were never
//! paired reveal their token in the reply.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use airfresh_common::token::Token;
use airfresh_protocols::packet::{self, Header};
use airfresh_protocols::MIIO_PORT;

use crate::error::DeviceError;

pub const BROADCAST: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::BROADCAST), MIIO_PORT);
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub addr: SocketAddr,
    pub device_id: u32,
    pub stamp: u32,
    pub token: Option<Token>,
}

impl From<(SocketAddr, Header)> for DiscoveredDevice {
    fn from((addr, header): (SocketAddr, Header)) -> Self {
        Self {
            addr,
            device_id: header.device_id,
            stamp: header.stamp,
            token: header.exposed_token(),
        }
    }
}

/// Broadcasts a hello to `target` and returns every device that answered, ordered by address.
///
/// `on_found` is called with the running count each time a new device shows up.
pub async fn discover(
    target: SocketAddr,
    window: Duration,
    on_found: Option<Arc<dyn Fn(usize) + Send + Sync>>,
) -> Result<Vec<DiscoveredDevice>, DeviceError> {
    let socket: UdpSocket = UdpSocket::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)).await?;
    socket.set_broadcast(true)?;
    socket.send_to(&packet::hello(), target).await?;

    let deadline: Instant = Instant::now() + window;
    let mut found: HashMap<SocketAddr, DiscoveredDevice> = HashMap::new();
    let mut buffer: [u8; 1024] = [0u8; 1024];

    loop {
        let (len, source) = match timeout_at(deadline, socket.recv_from(&mut buffer)).await {
            Ok(received) => received?,
            Err(_elapsed) => break,
        };

        let header: Header = match Header::parse(&buffer[..len]) {
            Ok(header) if header.is_hello() => header,
            Ok(_) | Err(_) => {
                debug!("Ignoring non-hello packet from {source}");
                continue;
            }
        };

        if found.insert(source, DiscoveredDevice::from((source, header))).is_none() {
            debug!("Device {:#010x} answered from {source}", header.device_id);
            if let Some(callback) = &on_found {
                callback(found.len());
            }
        }
    }

    let mut devices: Vec<DiscoveredDevice> = found.into_values().collect();
    devices.sort_by_key(|device| device.addr);
    Ok(devices)
}
