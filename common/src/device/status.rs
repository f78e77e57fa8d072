//! Status reports of the Air Fresh A1.
//!
//! A report is built by zipping the requested property names with the values
//! the device answered. Properties the device did not answer, or answered with
//! an unexpected type, read as `None`.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::mode::OperationMode;

/// Properties requested from the device, in request order.
pub const PROPERTIES: [&str; 14] = [
    "power",
    "pm25",
    "co2",
    "temperature_outside",
    "favourite_speed",
    "filter_rate",
    "filter_day",
    "control_speed",
    "ptc_on",
    "ptc_status",
    "child_lock",
    "sound",
    "display",
    "mode",
];

/// State attributes exposed on the fan entity.
pub const ATTRIBUTES: [&str; 13] = [
    "pm25",
    "co2",
    "mode",
    "temperature_outside",
    "favourite_speed",
    "filter_rate",
    "filter_day",
    "control_speed",
    "ptc_on",
    "ptc_status",
    "child_lock",
    "sound",
    "display",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirFreshStatus {
    data: HashMap<String, Value>,
}

impl AirFreshStatus {
    /// Pairs property names with values. Surplus on either side is dropped.
    pub fn from_values<S: AsRef<str>>(properties: &[S], values: Vec<Value>) -> Self {
        let data: HashMap<String, Value> = properties
            .iter()
            .map(|p| p.as_ref().to_string())
            .zip(values)
            .collect();
        Self { data }
    }

    pub fn raw(&self, property: &str) -> Option<&Value> {
        self.data.get(property).filter(|v| !v.is_null())
    }

    pub fn power(&self) -> Option<bool> {
        self.flag("power")
    }

    pub fn is_on(&self) -> bool {
        self.power() == Some(true)
    }

    pub fn pm25(&self) -> Option<i64> {
        self.number("pm25")
    }

    pub fn co2(&self) -> Option<i64> {
        self.number("co2")
    }

    pub fn temperature_outside(&self) -> Option<i64> {
        self.number("temperature_outside")
    }

    pub fn favourite_speed(&self) -> Option<i64> {
        self.number("favourite_speed")
    }

    pub fn filter_rate(&self) -> Option<i64> {
        self.number("filter_rate")
    }

    pub fn filter_day(&self) -> Option<i64> {
        self.number("filter_day")
    }

    pub fn control_speed(&self) -> Option<i64> {
        self.number("control_speed")
    }

    pub fn ptc_on(&self) -> Option<bool> {
        self.flag("ptc_on")
    }

    pub fn ptc_status(&self) -> Option<bool> {
        self.flag("ptc_status")
    }

    pub fn child_lock(&self) -> Option<bool> {
        self.flag("child_lock")
    }

    pub fn sound(&self) -> Option<bool> {
        self.flag("sound")
    }

    pub fn display(&self) -> Option<bool> {
        self.flag("display")
    }

    pub fn mode(&self) -> Option<OperationMode> {
        self.raw("mode")
            .and_then(Value::as_str)
            .and_then(OperationMode::from_value)
    }

    /// Value of one exposed attribute, as it is shown on the entity.
    pub fn attribute(&self, name: &str) -> Value {
        let value: Option<Value> = match name {
            "mode" => self.mode().map(|m| Value::from(m.value())),
            "ptc_on" | "ptc_status" | "child_lock" | "sound" | "display" | "power" => {
                self.flag(name).map(Value::from)
            }
            _ => self.number(name).map(Value::from),
        };
        value.unwrap_or(Value::Null)
    }

    /// Every exposed attribute in [`ATTRIBUTES`] order.
    pub fn attributes(&self) -> Vec<(&'static str, Value)> {
        ATTRIBUTES
            .iter()
            .map(|name| (*name, self.attribute(name)))
            .collect()
    }

    fn flag(&self, property: &str) -> Option<bool> {
        match self.raw(property)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "on" | "true" => Some(true),
                "off" | "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            _ => None,
        }
    }

    fn number(&self, property: &str) -> Option<i64> {
        match self.raw(property)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

fn opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

impl fmt::Display for AirFreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<AirFreshStatus power={}, pm25={}, co2={}, temperature_outside={}, \
             favourite_speed={}, filter_rate={}, filter_day={}, control_speed={}, \
             ptc_on={}, ptc_status={}, child_lock={}, sound={}, display={}, mode={}>",
            opt(self.power()),
            opt(self.pm25()),
            opt(self.co2()),
            opt(self.temperature_outside()),
            opt(self.favourite_speed()),
            opt(self.filter_rate()),
            opt(self.filter_day()),
            opt(self.control_speed()),
            opt(self.ptc_on()),
            opt(self.ptc_status()),
            opt(self.child_lock()),
            opt(self.sound()),
            opt(self.display()),
            opt(self.mode().map(|m| m.value())),
        )
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
