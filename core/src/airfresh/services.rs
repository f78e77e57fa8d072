//! # Services
//!
//! The eight services registered under the `fan` domain, and the validation of
//! their call data.
//!
//! Every service accepts an optional `entity_id` (one id, a comma separated
//! list, or an array). `airfresh_set_favourite_speed` additionally requires a
//! `speed` between 1 and 200. Any other key is rejected.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use airfresh_common::device::FavouriteSpeed;
use airfresh_common::utils::slug;

use super::entity::AirFreshEntity;
use crate::error::ServiceError;

pub const DOMAIN: &str = "fan";
pub const ATTR_ENTITY_ID: &str = "entity_id";
pub const ATTR_SPEED: &str = "speed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirFreshService {
    SetPtcOn,
    SetPtcOff,
    SetSoundOn,
    SetSoundOff,
    SetDisplayOn,
    SetDisplayOff,
    SetFilterReset,
    SetFavouriteSpeed,
}

impl AirFreshService {
    pub const ALL: [AirFreshService; 8] = [
        AirFreshService::SetPtcOn,
        AirFreshService::SetPtcOff,
        AirFreshService::SetFavouriteSpeed,
        AirFreshService::SetSoundOn,
        AirFreshService::SetSoundOff,
        AirFreshService::SetDisplayOn,
        AirFreshService::SetDisplayOff,
        AirFreshService::SetFilterReset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AirFreshService::SetPtcOn => "airfresh_set_ptc_on",
            AirFreshService::SetPtcOff => "airfresh_set_ptc_off",
            AirFreshService::SetSoundOn => "airfresh_set_sound_on",
            AirFreshService::SetSoundOff => "airfresh_set_sound_off",
            AirFreshService::SetDisplayOn => "airfresh_set_display_on",
            AirFreshService::SetDisplayOff => "airfresh_set_display_off",
            AirFreshService::SetFilterReset => "airfresh_set_filter_reset",
            AirFreshService::SetFavouriteSpeed => "airfresh_set_favourite_speed",
        }
    }

    /// `fan.<name>`
    pub fn full_name(&self) -> String {
        format!("{DOMAIN}.{}", self.name())
    }

    pub fn description(&self) -> &'static str {
        match self {
            AirFreshService::SetPtcOn => "Turn the PTC heater on",
            AirFreshService::SetPtcOff => "Turn the PTC heater off",
            AirFreshService::SetSoundOn => "Turn the buzzer on",
            AirFreshService::SetSoundOff => "Turn the buzzer off",
            AirFreshService::SetDisplayOn => "Turn the display on",
            AirFreshService::SetDisplayOff => "Turn the display off",
            AirFreshService::SetFilterReset => "Reset the filter counters",
            AirFreshService::SetFavouriteSpeed => "Set the favourite speed (speed: 1-200)",
        }
    }

    fn allowed_keys(&self) -> &'static [&'static str] {
        match self {
            AirFreshService::SetFavouriteSpeed => &[ATTR_ENTITY_ID, ATTR_SPEED],
            _ => &[ATTR_ENTITY_ID],
        }
    }
}

impl FromStr for AirFreshService {
    type Err = ServiceError;

    /// Accepts both `airfresh_set_ptc_on` and `fan.airfresh_set_ptc_on`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let name: &str = trimmed
            .strip_prefix(DOMAIN)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(trimmed);

        Self::ALL
            .into_iter()
            .find(|service| service.name() == name)
            .ok_or_else(|| ServiceError::UnknownService(s.to_string()))
    }
}

impl fmt::Display for AirFreshService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCall {
    pub service: AirFreshService,
    /// `None` targets every entity.
    pub entity_ids: Option<Vec<String>>,
    pub speed: Option<FavouriteSpeed>,
}

impl ServiceCall {
    pub fn new(service: AirFreshService) -> Self {
        Self {
            service,
            entity_ids: None,
            speed: None,
        }
    }

    /// Validates `data` against the schema of `service`.
    pub fn parse(service: &str, data: &Value) -> Result<Self, ServiceError> {
        let service: AirFreshService = service.parse()?;
        let empty: Map<String, Value> = Map::new();
        let data: &Map<String, Value> = match data {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => return Err(ServiceError::Schema(format!("expected a mapping, got {other}"))),
        };

        if let Some(extra) = data.keys().find(|key| !service.allowed_keys().contains(&key.as_str())) {
            return Err(ServiceError::Schema(format!(
                "extra keys not allowed @ data['{extra}']"
            )));
        }

        let entity_ids: Option<Vec<String>> = match data.get(ATTR_ENTITY_ID) {
            None | Some(Value::Null) => None,
            // An empty target list means every entity.
            Some(value) => Some(parse_entity_ids(value)?).filter(|ids| !ids.is_empty()),
        };

        let speed: Option<FavouriteSpeed> = match service {
            AirFreshService::SetFavouriteSpeed => {
                let raw: &Value = data.get(ATTR_SPEED).ok_or_else(|| {
                    ServiceError::Schema("required key not provided @ data['speed']".into())
                })?;
                let value: i64 = coerce_int(raw)?;
                Some(FavouriteSpeed::new(value).ok_or(ServiceError::OutOfRange(value))?)
            }
            _ => None,
        };

        Ok(Self {
            service,
            entity_ids,
            speed,
        })
    }

    pub fn targets(&self, entity_id: &str) -> bool {
        match &self.entity_ids {
            None => true,
            Some(ids) => ids.iter().any(|id| id == entity_id),
        }
    }

    /// Runs the call against one entity. Returns the device acknowledgement.
    pub async fn invoke(&self, entity: &mut AirFreshEntity) -> bool {
        match self.service {
            AirFreshService::SetPtcOn => entity.set_ptc_on().await,
            AirFreshService::SetPtcOff => entity.set_ptc_off().await,
            AirFreshService::SetSoundOn => entity.set_sound_on().await,
            AirFreshService::SetSoundOff => entity.set_sound_off().await,
            AirFreshService::SetDisplayOn => entity.set_display_on().await,
            AirFreshService::SetDisplayOff => entity.set_display_off().await,
            AirFreshService::SetFilterReset => entity.set_filter_reset().await,
            AirFreshService::SetFavouriteSpeed => match self.speed {
                Some(speed) => entity.set_favourite_speed(speed).await,
                None => false,
            },
        }
    }
}

fn parse_entity_ids(value: &Value) -> Result<Vec<String>, ServiceError> {
    let raw: Vec<String> = match value {
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ServiceError::Schema(format!("entity id must be a string, got {item}")))
            })
            .collect::<Result<_, _>>()?,
        other => return Err(ServiceError::Schema(format!("invalid entity_id {other}"))),
    };

    let ids: Vec<String> = raw
        .iter()
        .map(|id| id.trim().to_ascii_lowercase())
        .filter(|id| !id.is_empty())
        .collect();

    if let Some(bad) = ids.iter().find(|id| !slug::is_valid_entity_id(id)) {
        return Err(ServiceError::Schema(format!("invalid entity id '{bad}'")));
    }
    Ok(ids)
}

fn coerce_int(value: &Value) -> Result<i64, ServiceError> {
    let coerced: Option<i64> = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    coerced.ok_or_else(|| ServiceError::Schema(format!("expected int @ data['speed'], got {value}")))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
