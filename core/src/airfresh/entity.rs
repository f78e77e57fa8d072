//! # Fan Entity
//!
//! The host facing representation of one Air Fresh unit.
//!
//! The entity caches the last known state and attributes. A failed poll or a
//! failed command marks it unavailable instead of returning an error; only
//! invalid input (an unknown speed name) is reported back to the caller.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use tracing::debug;

use airfresh_common::device::status::ATTRIBUTES;
use airfresh_common::device::{AirFreshStatus, FavouriteSpeed, Model, OperationMode};
use airfresh_common::error;

use super::device::{AirFresh, Command};
use crate::error::{DeviceError, ServiceError};
use crate::network::info::DeviceInfo;

/// Feature flag: the fan accepts a speed (operation mode).
pub const SUPPORT_SET_SPEED: u32 = 1;
pub const ATTR_MODEL: &str = "model";
pub const ATTR_MODE: &str = "mode";

pub struct AirFreshEntity {
    name: String,
    entity_id: String,
    host: String,
    model: Model,
    device: AirFresh,
    available: bool,
    state: Option<bool>,
    attributes: BTreeMap<String, Value>,
}

impl AirFreshEntity {
    pub fn new(name: impl Into<String>, host: impl Into<String>, model: Model, device: AirFresh) -> Self {
        let mut attributes: BTreeMap<String, Value> = BTreeMap::new();
        attributes.insert(ATTR_MODEL.to_string(), json!(model.as_str()));
        for attribute in ATTRIBUTES {
            attributes.insert(attribute.to_string(), Value::Null);
        }

        Self {
            name: name.into(),
            entity_id: String::new(),
            host: host.into(),
            model,
            device,
            available: false,
            state: None,
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub(crate) fn set_entity_id(&mut self, entity_id: String) {
        self.entity_id = entity_id;
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// No stable id is known for a device configured by host.
    pub fn unique_id(&self) -> Option<&str> {
        None
    }

    pub fn supported_features(&self) -> u32 {
        SUPPORT_SET_SPEED
    }

    pub fn should_poll(&self) -> bool {
        true
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn is_on(&self) -> Option<bool> {
        self.state
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn speed_list(&self) -> Vec<&'static str> {
        OperationMode::ALL.iter().map(|mode| mode.name()).collect()
    }

    /// The current operation mode name while the fan is on.
    pub fn speed(&self) -> Option<&'static str> {
        if self.state != Some(true) {
            return None;
        }
        self.attributes
            .get(ATTR_MODE)
            .and_then(Value::as_str)
            .and_then(OperationMode::from_value)
            .map(|mode| mode.name())
    }

    /// `on`, `off`, or `unavailable`.
    pub fn state_label(&self) -> &'static str {
        match (self.available, self.state) {
            (false, _) => "unavailable",
            (true, Some(true)) => "on",
            (true, _) => "off",
        }
    }

    /// Fetches the state from the device.
    pub async fn update(&mut self) {
        match self.device.status().await {
            Ok(status) => {
                debug!("Got new state: {status}");
                self.apply(&status);
            }
            Err(e) => {
                self.available = false;
                error!("Got exception while fetching the state: {e}");
            }
        }
    }

    fn apply(&mut self, status: &AirFreshStatus) {
        self.available = true;
        self.state = Some(status.is_on());
        for (name, value) in status.attributes() {
            self.attributes.insert(name.to_string(), value);
        }
    }

    pub async fn info(&self) -> Result<DeviceInfo, DeviceError> {
        self.device.info().await
    }

    /// Sends a command, returns whether the device acknowledged it with `["ok"]`.
    ///
    /// A device error is logged with `mask_error` and marks the entity unavailable.
    pub async fn try_command(&mut self, mask_error: &str, command: Command) -> bool {
        let result = self.device.execute(command).await;
        self.acknowledge(mask_error, result)
    }

    /// Sends an arbitrary method, with the same error handling as [`Self::try_command`].
    pub async fn send_raw_cmd(&mut self, mask_error: &str, method: &str, params: Value) -> bool {
        debug!("sending cmd {method} {params}");
        let result = self.device.send(method, params).await;
        self.acknowledge(mask_error, result)
    }

    /// Sends an arbitrary method and hands back the raw result.
    pub async fn raw(&mut self, method: &str, params: Value) -> Result<Value, DeviceError> {
        let result = self.device.send(method, params).await;
        if result.is_err() {
            self.available = false;
        }
        result
    }

    fn acknowledge(&mut self, mask_error: &str, result: Result<Value, DeviceError>) -> bool {
        match result {
            Ok(value) => {
                debug!("Response received from miio device: {value}");
                is_success(&value)
            }
            Err(e) => {
                error!("{mask_error}: {e}");
                self.available = false;
                false
            }
        }
    }

    /// Turns the fan on, or only switches the mode when `speed` is given.
    pub async fn turn_on(&mut self, speed: Option<&str>) -> Result<bool, ServiceError> {
        match speed {
            Some(speed) => self.set_speed(speed).await,
            None => Ok(self
                .try_command("Turning the miio device on failed.", Command::Power(true))
                .await),
        }
    }

    pub async fn turn_off(&mut self) -> bool {
        self.try_command("Turning the miio device off failed.", Command::Power(false))
            .await
    }

    pub async fn set_speed(&mut self, speed: &str) -> Result<bool, ServiceError> {
        let mode: OperationMode = speed
            .parse()
            .map_err(|_| ServiceError::InvalidSpeed(speed.to_string()))?;

        debug!("Setting the operation mode to: {mode}");
        if mode == OperationMode::Off {
            return Ok(self.turn_off().await);
        }
        Ok(self
            .try_command("Setting operation mode of the miio device failed.", Command::Mode(mode))
            .await)
    }

    pub async fn set_ptc_on(&mut self) -> bool {
        debug!("Setting the ptc to on");
        self.try_command("Turning the ptc of the miio device on failed.", Command::Ptc(true))
            .await
    }

    pub async fn set_ptc_off(&mut self) -> bool {
        debug!("Setting the ptc to off");
        self.try_command("Turning the ptc of the miio device off failed.", Command::Ptc(false))
            .await
    }

    pub async fn set_sound_on(&mut self) -> bool {
        debug!("Setting the sound to on");
        self.try_command("Turning the sound of the miio device on failed.", Command::Sound(true))
            .await
    }

    pub async fn set_sound_off(&mut self) -> bool {
        debug!("Setting the sound to off");
        self.try_command("Turning the sound of the miio device off failed.", Command::Sound(false))
            .await
    }

    pub async fn set_display_on(&mut self) -> bool {
        debug!("Setting the display to on");
        self.try_command("Turning the display of the miio device on failed.", Command::Display(true))
            .await
    }

    pub async fn set_display_off(&mut self) -> bool {
        debug!("Setting the display to off");
        self.try_command("Turning the display of the miio device off failed.", Command::Display(false))
            .await
    }

    pub async fn set_filter_reset(&mut self) -> bool {
        debug!("Setting the filter reset");
        self.try_command("Reset filter on miio device failed.", Command::FilterReset)
            .await
    }

    pub async fn set_favourite_speed(&mut self, speed: FavouriteSpeed) -> bool {
        debug!("Setting the favourite speed to: {speed}");
        self.try_command(
            "Setting favourite speed of the miio device failed.",
            Command::FavouriteSpeed(speed),
        )
        .await
    }
}

fn is_success(value: &Value) -> bool {
    matches!(value.as_array().map(Vec::as_slice), Some([Value::String(s)]) if s == "ok")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
