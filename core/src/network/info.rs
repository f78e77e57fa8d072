use serde_json::Value;

use super::channel::MiioChannel;
use crate::error::DeviceError;

/// The subset of the `miIO.info` reply worth showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceInfo {
    pub model: Option<String>,
    pub firmware: Option<String>,
    pub hardware: Option<String>,
    pub mac: Option<String>,
    pub ip: Option<String>,
    pub ssid: Option<String>,
    pub uptime: Option<u64>,
    pub raw: Value,
}

impl DeviceInfo {
    pub fn from_value(raw: Value) -> Self {
        let text = |pointer: &str| raw.pointer(pointer).and_then(Value::as_str).map(str::to_string);
        Self {
            model: text("/model"),
            firmware: text("/fw_ver"),
            hardware: text("/hw_ver"),
            mac: text("/mac"),
            ip: text("/netif/localIp"),
            ssid: text("/ap/ssid"),
            uptime: raw.pointer("/life").and_then(Value::as_u64),
            raw,
        }
    }

    /// Pairs of label and value for every known field, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = Vec::new();
        let mut push = |label: &'static str, value: &Option<String>| {
            if let Some(value) = value {
                fields.push((label, value.clone()));
            }
        };
        push("Model", &self.model);
        push("Firmware", &self.firmware);
        push("Hardware", &self.hardware);
        push("MAC", &self.mac);
        push("IP", &self.ip);
        push("SSID", &self.ssid);
        if let Some(uptime) = self.uptime {
            fields.push(("Uptime", format!("{uptime}s")));
        }
        fields
    }
}

pub async fn fetch(channel: &dyn MiioChannel) -> Result<DeviceInfo, DeviceError> {
    let raw: Value = channel.send("miIO.info", Value::Array(Vec::new())).await?;
    if !raw.is_object() {
        return Err(DeviceError::UnexpectedResponse(format!("miIO.info returned {raw}")));
    }
    Ok(DeviceInfo::from_value(raw))
}
