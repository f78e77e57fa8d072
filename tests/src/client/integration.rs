#![cfg(test)]
use std::time::Duration;

use serde_json::json;

use airfresh_common::token::Token;
use airfresh_core::DeviceError;
use airfresh_core::network::{ClientOptions, MiioClient};

use crate::mock::{MOCK_DEVICE_ID, MockDevice};

fn quick(retries: u32) -> ClientOptions {
    ClientOptions {
        timeout: Duration::from_millis(200),
        retries,
    }
}

#[tokio::test]
async fn handshake_reports_device_identity() {
    let device = MockDevice::start().await.unwrap();
    let client = device.client(quick(0)).await.unwrap();

    let hello = client.handshake().await.unwrap();

    assert_eq!(hello.device_id, MOCK_DEVICE_ID);
    assert_eq!(device.state().hellos, 1);
}

#[tokio::test]
async fn request_returns_result_after_implicit_handshake() {
    let device = MockDevice::start().await.unwrap();
    let client = device.client(quick(0)).await.unwrap();

    let result = client.send_command("get_prop", json!(["power", "mode"])).await.unwrap();

    assert_eq!(result, json!(["on", "auto"]));
    assert_eq!(device.state().hellos, 1);
}

#[tokio::test]
async fn request_ids_increase_per_request() {
    let device = MockDevice::start().await.unwrap();
    let client = device.client(quick(0)).await.unwrap();

    client.send_command("get_prop", json!(["power"])).await.unwrap();
    client.send_command("get_prop", json!(["mode"])).await.unwrap();

    let ids: Vec<u32> = device.state().requests.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(device.state().hellos, 1, "one handshake serves the whole session");
}

#[tokio::test]
async fn scalar_params_are_wrapped() {
    let device = MockDevice::start().await.unwrap();
    let client = device.client(quick(0)).await.unwrap();

    client.send_command("set_mode", json!("sleep")).await.unwrap();

    assert_eq!(device.state().requests[0].params, json!(["sleep"]));
    assert_eq!(device.state().props["mode"], json!("sleep"));
}

#[tokio::test]
async fn device_error_is_surfaced() {
    let device = MockDevice::start().await.unwrap();
    let client = device.client(quick(0)).await.unwrap();

    let err = client.send_command("set_child_lock", json!(["on"])).await.unwrap_err();

    assert!(matches!(err, DeviceError::Device { code: -32601, .. }), "{err}");
}

#[tokio::test]
async fn id_collision_is_retried_with_a_later_id() {
    let device = MockDevice::start().await.unwrap();
    device.state().behaviour.errors.push_back((-9999, "id collision".into()));
    let client = device.client(quick(1)).await.unwrap();

    let result = client.send_command("get_prop", json!(["co2"])).await.unwrap();

    assert_eq!(result, json!([612]));
    let ids: Vec<u32> = device.state().requests.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 102]);
}

#[tokio::test]
async fn lost_reply_triggers_a_new_handshake() {
    let device = MockDevice::start().await.unwrap();
    device.state().behaviour.drop_requests = 1;
    let client = device.client(quick(2)).await.unwrap();

    let result = client.send_command("get_prop", json!(["pm25"])).await.unwrap();

    assert_eq!(result, json!([12]));
    assert_eq!(device.state().hellos, 2);
    assert_eq!(device.state().requests.len(), 2);
}

#[tokio::test]
async fn timeout_after_the_last_retry_fails() {
    let device = MockDevice::start().await.unwrap();
    device.state().behaviour.drop_requests = 5;
    let client = device.client(quick(1)).await.unwrap();

    let err = client.send_command("get_prop", json!(["pm25"])).await.unwrap_err();

    assert!(matches!(err, DeviceError::Timeout { ref method } if method == "get_prop"));
    assert_eq!(device.state().requests.len(), 2);
}

#[tokio::test]
async fn stale_reply_is_skipped() {
    let device = MockDevice::start().await.unwrap();
    device.state().behaviour.stale_reply = true;
    let client = device.client(quick(0)).await.unwrap();

    let result = client.send_command("get_prop", json!(["temperature_outside"])).await.unwrap();

    assert_eq!(result, json!([21]));
}

#[tokio::test]
async fn wrong_token_never_gets_an_answer() {
    let device = MockDevice::start().await.unwrap();
    let wrong: Token = "ffeeddccbbaa99887766554433221100".parse().unwrap();
    let client = MiioClient::connect_addr(device.addr(), wrong, quick(0)).await.unwrap();

    let err = client.send_command("get_prop", json!(["power"])).await.unwrap_err();

    assert!(matches!(err, DeviceError::Timeout { .. }));
    assert!(device.state().requests.is_empty());
}
