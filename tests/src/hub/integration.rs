#![cfg(test)]
use std::time::Duration;

use serde_json::json;

use airfresh_common::device::Model;
use airfresh_core::ServiceError;
use airfresh_core::airfresh::{AirFresh, AirFreshEntity};
use airfresh_core::hub::Hub;
use airfresh_core::network::ClientOptions;

use crate::mock::MockDevice;

async fn add(hub: &mut Hub, device: &MockDevice, name: &str) -> String {
    let client = device.client(ClientOptions::default()).await.unwrap();
    let entity = AirFreshEntity::new(
        name,
        device.addr().to_string(),
        Model::AirFreshA1,
        AirFresh::new(Box::new(client)),
    );
    hub.add_entity(entity, true).await.entity_id().to_string()
}

#[tokio::test]
async fn added_entities_are_updated_and_named() {
    let device = MockDevice::start().await.unwrap();
    let mut hub = Hub::new(Duration::from_secs(30));

    let id = add(&mut hub, &device, "Living Room").await;

    assert_eq!(id, "fan.living_room");
    let entity = hub.entity(&id).unwrap();
    assert!(entity.available());
    assert_eq!(entity.state_label(), "on");
}

#[tokio::test]
async fn service_call_reaches_only_the_targeted_entity() {
    let kitchen = MockDevice::start().await.unwrap();
    let bedroom = MockDevice::start().await.unwrap();
    let mut hub = Hub::new(Duration::from_secs(30));
    let kitchen_id = add(&mut hub, &kitchen, "Kitchen").await;
    add(&mut hub, &bedroom, "Bedroom").await;

    let handled = hub
        .call_service("fan.airfresh_set_ptc_on", &json!({ "entity_id": kitchen_id }))
        .await
        .unwrap();

    assert_eq!(handled, vec![kitchen_id.clone()]);
    assert_eq!(kitchen.state().props["ptc_on"], json!(true));
    assert_eq!(bedroom.state().props["ptc_on"], json!(false));
    assert!(!bedroom.methods().contains(&"set_ptc_on".to_string()));

    // The call refreshes the entity afterwards.
    assert_eq!(hub.entity(&kitchen_id).unwrap().attributes()["ptc_on"], json!(true));
}

#[tokio::test]
async fn service_call_without_entity_ids_reaches_everyone() {
    let a = MockDevice::start().await.unwrap();
    let b = MockDevice::start().await.unwrap();
    let mut hub = Hub::new(Duration::from_secs(30));
    add(&mut hub, &a, "Fresh").await;
    add(&mut hub, &b, "Fresh").await;

    let handled = hub.call_service("airfresh_set_display_off", &json!({})).await.unwrap();

    assert_eq!(handled, vec!["fan.fresh".to_string(), "fan.fresh_2".to_string()]);
    assert_eq!(a.state().props["display"], json!(false));
    assert_eq!(b.state().props["display"], json!(false));
}

#[tokio::test]
async fn favourite_speed_is_validated_before_sending() {
    let device = MockDevice::start().await.unwrap();
    let mut hub = Hub::new(Duration::from_secs(30));
    add(&mut hub, &device, "Hall").await;
    let before: usize = device.state().requests.len();

    let err = hub
        .call_service("fan.airfresh_set_favourite_speed", &json!({ "speed": 250 }))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::OutOfRange(250)));
    assert_eq!(device.state().requests.len(), before);

    hub.call_service("fan.airfresh_set_favourite_speed", &json!({ "speed": "60" }))
        .await
        .unwrap();
    assert_eq!(device.state().props["favourite_speed"], json!(60));
}

#[tokio::test]
async fn unknown_service_and_extra_keys_are_refused() {
    let device = MockDevice::start().await.unwrap();
    let mut hub = Hub::new(Duration::from_secs(30));
    add(&mut hub, &device, "Hall").await;

    let unknown = hub.call_service("fan.airfresh_set_turbo", &json!({})).await.unwrap_err();
    assert!(matches!(unknown, ServiceError::UnknownService(_)));

    let extra = hub
        .call_service("fan.airfresh_set_sound_on", &json!({ "speed": 10 }))
        .await
        .unwrap_err();
    assert!(matches!(extra, ServiceError::Schema(_)));
}

#[tokio::test]
async fn filter_reset_refreshes_filter_attributes() {
    let device = MockDevice::start().await.unwrap();
    let mut hub = Hub::new(Duration::from_secs(30));
    let id = add(&mut hub, &device, "Hall").await;

    hub.call_service("fan.airfresh_set_filter_reset", &json!({ "entity_id": [id.clone()] }))
        .await
        .unwrap();

    let attributes = hub.entity(&id).unwrap().attributes();
    assert_eq!(attributes["filter_rate"], json!(100));
    assert_eq!(attributes["filter_day"], json!(180));
}
