//! Xiaomi Mi Air Purifier A1 (MJXFJ-150-A1), model `dmaker.airfresh.a1`.

pub mod device;
pub mod entity;
pub mod services;

pub use device::{AirFresh, Command};
pub use entity::AirFreshEntity;
pub use services::{AirFreshService, ServiceCall};
