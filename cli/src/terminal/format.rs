use colored::*;
use serde_json::Value;

use airfresh_core::airfresh::AirFreshEntity;
use airfresh_core::network::discovery::DiscoveredDevice;
use airfresh_core::network::info::DeviceInfo;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

fn unit(attribute: &str) -> &'static str {
    match attribute {
        "pm25" => " µg/m³",
        "co2" => " ppm",
        "temperature_outside" => " °C",
        "filter_rate" => " %",
        "filter_day" => " days",
        _ => "",
    }
}

fn label(attribute: &str) -> String {
    match attribute {
        "pm25" => "PM2.5".to_string(),
        "co2" => "CO2".to_string(),
        "ptc_on" => "PTC".to_string(),
        "ptc_status" => "PTC status".to_string(),
        other => {
            let mut label: String = other.replace('_', " ");
            if let Some(first) = label.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            label
        }
    }
}

pub fn value_to_colored(attribute: &str, value: &Value) -> ColoredString {
    match value {
        Value::Null => "-".color(colors::EMPTY),
        Value::Bool(true) => "on".color(colors::STATE_ON),
        Value::Bool(false) => "off".color(colors::STATE_OFF),
        Value::String(s) => s.color(colors::VALUE),
        other => format!("{other}{}", unit(attribute)).color(colors::VALUE),
    }
}

pub fn state_to_colored(entity: &AirFreshEntity) -> ColoredString {
    let label: &str = entity.state_label();
    match label {
        "on" => label.color(colors::STATE_ON).bold(),
        "off" => label.color(colors::STATE_OFF).bold(),
        _ => label.color(colors::STATE_UNAVAILABLE).bold(),
    }
}

pub fn entity_details(entity: &AirFreshEntity) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("Entity".to_string(), entity.entity_id().color(colors::ACCENT)),
        ("Host".to_string(), entity.host().color(colors::ADDRESS)),
        ("State".to_string(), state_to_colored(entity)),
    ];

    if let Some(speed) = entity.speed() {
        details.push(("Speed".to_string(), speed.color(colors::VALUE)));
    }

    for (name, value) in entity.attributes() {
        details.push((label(name), value_to_colored(name, value)));
    }

    details
}

pub fn info_details(info: &DeviceInfo) -> Vec<Detail> {
    info.fields()
        .into_iter()
        .map(|(key, value)| {
            let value: ColoredString = match key {
                "IP" | "MAC" => value.color(colors::ADDRESS),
                _ => value.color(colors::VALUE),
            };
            (key.to_string(), value)
        })
        .collect()
}

pub fn discovered_details(device: &DiscoveredDevice) -> Vec<Detail> {
    let token: ColoredString = match device.token {
        Some(token) => token.to_hex().color(colors::SECRET),
        None => "hidden".color(colors::EMPTY),
    };

    vec![
        ("Address".to_string(), device.addr.ip().to_string().color(colors::ADDRESS)),
        ("Device ID".to_string(), format!("{:#010x}", device.device_id).color(colors::VALUE)),
        ("Uptime".to_string(), format!("{}s", device.stamp).color(colors::VALUE)),
        ("Token".to_string(), token),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
