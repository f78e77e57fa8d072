#![cfg(test)]
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use airfresh_core::network::discovery;

use crate::mock::{MOCK_DEVICE_ID, MockDevice};

const WINDOW: Duration = Duration::from_millis(300);

#[tokio::test]
async fn provisioned_device_hides_its_token() {
    let device = MockDevice::start().await.unwrap();

    let found = discovery::discover(device.addr(), WINDOW, None).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].addr, device.addr());
    assert_eq!(found[0].device_id, MOCK_DEVICE_ID);
    assert_eq!(found[0].token, None);
}

#[tokio::test]
async fn unprovisioned_device_reveals_its_token() {
    let device = MockDevice::start().await.unwrap();
    device.state().behaviour.expose_token = true;
    let seen: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();

    let found = discovery::discover(
        device.addr(),
        WINDOW,
        Some(Arc::new(move |count| counter.store(count, Ordering::Relaxed))),
    )
    .await
    .unwrap();

    assert_eq!(found[0].token, Some(device.token()));
    assert_eq!(seen.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn silent_target_yields_nothing() {
    let silent = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let found = discovery::discover(silent.local_addr().unwrap(), WINDOW, None).await.unwrap();

    assert!(found.is_empty());
}
