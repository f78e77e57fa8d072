//! # Device Model
//!
//! Everything known about the Xiaomi Mi Air Purifier A1 (MJXFJ-150-A1),
//! independent of how it is reached on the network.

pub mod mode;
pub mod status;

use std::fmt;
use std::str::FromStr;

pub use mode::OperationMode;
pub use status::AirFreshStatus;

pub const MODEL_AIRFRESH_A1: &str = "dmaker.airfresh.a1";

pub const FAVOURITE_SPEED_MIN: i64 = 1;
pub const FAVOURITE_SPEED_MAX: i64 = 200;

/// A favourite fan speed, always within `1..=200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FavouriteSpeed(u8);

impl FavouriteSpeed {
    pub fn new(value: i64) -> Option<Self> {
        (FAVOURITE_SPEED_MIN..=FAVOURITE_SPEED_MAX)
            .contains(&value)
            .then_some(Self(value as u8))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for FavouriteSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device models this integration can drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Model {
    #[default]
    AirFreshA1,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::AirFreshA1 => MODEL_AIRFRESH_A1,
        }
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            MODEL_AIRFRESH_A1 => Ok(Model::AirFreshA1),
            other => Err(format!("unsupported model: {other}")),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
