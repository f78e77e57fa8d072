#![cfg(test)]
use serde_json::json;

use airfresh_common::device::{FavouriteSpeed, Model, OperationMode};
use airfresh_core::ServiceError;
use airfresh_core::airfresh::{AirFresh, AirFreshEntity, Command};
use airfresh_core::network::ClientOptions;

use crate::mock::{MOCK_MODEL, MockDevice};

async fn device_and_fresh(device: &MockDevice) -> AirFresh {
    AirFresh::new(Box::new(device.client(ClientOptions::default()).await.unwrap()))
}

async fn entity(device: &MockDevice) -> AirFreshEntity {
    AirFreshEntity::new(
        "Living Room",
        device.addr().to_string(),
        Model::AirFreshA1,
        device_and_fresh(device).await,
    )
}

#[tokio::test]
async fn status_reads_every_property_in_chunks() {
    let device = MockDevice::start().await.unwrap();
    let airfresh = device_and_fresh(&device).await;

    let status = airfresh.status().await.unwrap();

    assert!(status.is_on());
    assert_eq!(status.mode(), Some(OperationMode::Auto));
    assert_eq!(status.co2(), Some(612));
    assert_eq!(status.filter_day(), Some(143));
    assert_eq!(status.sound(), Some(true));
    assert_eq!(device.methods(), vec!["get_prop"; 4]);
    assert!(device.state().requests.iter().all(|r| r.params.as_array().unwrap().len() <= 4));
}

#[tokio::test]
async fn short_get_prop_leaves_trailing_properties_empty() {
    let device = MockDevice::start().await.unwrap();
    device.state().behaviour.short_get_prop = true;
    let airfresh = device_and_fresh(&device).await;

    let status = airfresh.status().await.unwrap();

    assert_eq!(status.power(), Some(true));
    assert_eq!(status.mode(), None);
}

#[tokio::test]
async fn commands_reach_the_device() {
    let device = MockDevice::start().await.unwrap();
    let airfresh = device_and_fresh(&device).await;

    let speed = FavouriteSpeed::new(150).unwrap();
    assert_eq!(airfresh.execute(Command::FavouriteSpeed(speed)).await.unwrap(), json!(["ok"]));
    assert_eq!(airfresh.execute(Command::Ptc(true)).await.unwrap(), json!(["ok"]));

    let state = device.state();
    assert_eq!(state.props["favourite_speed"], json!(150));
    assert_eq!(state.props["ptc_on"], json!(true));
}

#[tokio::test]
async fn entity_update_fills_state_and_attributes() {
    let device = MockDevice::start().await.unwrap();
    let mut entity = entity(&device).await;
    assert!(!entity.available());

    entity.update().await;

    assert!(entity.available());
    assert_eq!(entity.is_on(), Some(true));
    assert_eq!(entity.speed(), Some("Auto"));
    assert_eq!(entity.attributes()["co2"], json!(612));
    assert_eq!(entity.attributes()["model"], json!(MOCK_MODEL));
}

#[tokio::test]
async fn turning_off_clears_the_speed() {
    let device = MockDevice::start().await.unwrap();
    let mut entity = entity(&device).await;

    assert!(entity.turn_off().await);
    entity.update().await;

    assert_eq!(entity.state_label(), "off");
    assert_eq!(entity.speed(), None);
}

#[tokio::test]
async fn speed_names_map_to_modes() {
    let device = MockDevice::start().await.unwrap();
    let mut entity = entity(&device).await;

    assert!(entity.set_speed("Favourite").await.unwrap());
    assert_eq!(device.state().props["mode"], json!("favourite"));

    assert!(entity.set_speed("Off").await.unwrap());
    assert_eq!(device.state().props["power"], json!("off"));
    assert_eq!(device.methods().last().map(String::as_str), Some("set_power"));

    let err = entity.set_speed("Turbo").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidSpeed(_)));
}

#[tokio::test]
async fn turn_on_with_speed_only_sets_the_mode() {
    let device = MockDevice::start().await.unwrap();
    device.state().props.insert("power".into(), json!("off"));
    let mut entity = entity(&device).await;

    assert!(entity.turn_on(Some("sleep")).await.unwrap());

    assert_eq!(device.methods(), vec!["set_mode"]);
    assert_eq!(device.state().props["mode"], json!("sleep"));
}

#[tokio::test]
async fn failed_command_marks_the_entity_unavailable() {
    let device = MockDevice::start().await.unwrap();
    let mut entity = entity(&device).await;
    entity.update().await;
    device.state().behaviour.errors.push_back((-5001, "busy".into()));

    assert!(!entity.set_sound_off().await);
    assert!(!entity.available());
    assert_eq!(entity.state_label(), "unavailable");

    entity.update().await;
    assert!(entity.available());
}

#[tokio::test]
async fn info_is_read_from_miio_info() {
    let device = MockDevice::start().await.unwrap();
    let entity = entity(&device).await;

    let info = entity.info().await.unwrap();

    assert_eq!(info.model.as_deref(), Some(MOCK_MODEL));
    assert_eq!(info.ssid.as_deref(), Some("home"));
    assert_eq!(info.uptime, Some(1234));
}

#[tokio::test]
async fn raw_commands_pass_through() {
    let device = MockDevice::start().await.unwrap();
    let mut entity = entity(&device).await;

    let result = entity.raw("get_prop", json!(["filter_rate"])).await.unwrap();
    assert_eq!(result, json!([87]));

    assert!(entity.send_raw_cmd("Reset failed.", "set_filter_reset", json!([true])).await);
    assert_eq!(device.state().props["filter_rate"], json!(100));
}
