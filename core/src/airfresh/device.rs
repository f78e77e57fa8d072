use serde_json::{Value, json};
use tracing::debug;

use airfresh_common::device::status::PROPERTIES;
use airfresh_common::device::{AirFreshStatus, FavouriteSpeed, OperationMode};

use crate::error::DeviceError;
use crate::network::MiioChannel;
use crate::network::info::{self, DeviceInfo};

/// The device answers at most this many properties per `get_prop`.
pub const GET_PROP_CHUNK: usize = 4;

/// Commands understood by the Air Fresh A1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Power(bool),
    Mode(OperationMode),
    Ptc(bool),
    Sound(bool),
    Display(bool),
    FilterReset,
    FavouriteSpeed(FavouriteSpeed),
}

impl Command {
    pub fn method(&self) -> &'static str {
        match self {
            Command::Power(_) => "set_power",
            Command::Mode(_) => "set_mode",
            Command::Ptc(_) => "set_ptc_on",
            Command::Sound(_) => "set_sound_on",
            Command::Display(_) => "set_display_on",
            Command::FilterReset => "set_filter_reset",
            Command::FavouriteSpeed(_) => "set_favourite_speed",
        }
    }

    pub fn params(&self) -> Value {
        match self {
            Command::Power(on) | Command::Ptc(on) | Command::Sound(on) | Command::Display(on) => json!([on]),
            Command::Mode(mode) => json!([mode.value()]),
            Command::FilterReset => json!([true]),
            Command::FavouriteSpeed(speed) => json!([speed.get()]),
        }
    }
}

/// Typed access to one Air Fresh unit over any [`MiioChannel`].
pub struct AirFresh {
    channel: Box<dyn MiioChannel>,
}

impl AirFresh {
    pub fn new(channel: Box<dyn MiioChannel>) -> Self {
        Self { channel }
    }

    pub async fn send(&self, method: &str, params: Value) -> Result<Value, DeviceError> {
        self.channel.send(method, params).await
    }

    pub async fn execute(&self, command: Command) -> Result<Value, DeviceError> {
        self.send(command.method(), command.params()).await
    }

    /// Reads every property, [`GET_PROP_CHUNK`] at a time.
    pub async fn status(&self) -> Result<AirFreshStatus, DeviceError> {
        let mut values: Vec<Value> = Vec::with_capacity(PROPERTIES.len());

        for chunk in PROPERTIES.chunks(GET_PROP_CHUNK) {
            match self.send("get_prop", json!(chunk)).await? {
                Value::Array(answered) => values.extend(answered),
                other => {
                    return Err(DeviceError::UnexpectedResponse(format!(
                        "get_prop returned {other}"
                    )));
                }
            }
        }

        if values.len() != PROPERTIES.len() {
            debug!(
                "Count ({}) of requested properties does not match the count ({}) of received values.",
                PROPERTIES.len(),
                values.len()
            );
        }

        Ok(AirFreshStatus::from_values(&PROPERTIES, values))
    }

    pub async fn info(&self) -> Result<DeviceInfo, DeviceError> {
        info::fetch(self.channel.as_ref()).await
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
