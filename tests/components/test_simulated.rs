//! Tests for backends/simulated.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kodegen_android_notify::{
    DeliveryOptions, Importance, NotificationChannel, NotificationStyle, SimulationEventKind,
};

use crate::support::dev_manager;

#[tokio::test]
async fn test_dev_mode_permissions_short_circuit() {
    let manager = dev_manager();
    assert!(manager.is_dev_mode());
    assert!(manager.check_permission().await.unwrap());
    assert!(manager.request_permission().await.unwrap());
}

#[tokio::test]
async fn test_send_counts_and_acknowledges() {
    let manager = dev_manager();
    let simulator = Arc::clone(manager.simulator().unwrap());
    let mut events = simulator.subscribe();

    let handle = manager.send("Hello", "World").await.unwrap();
    manager
        .create("Silent", "Shh")
        .send(DeliveryOptions::default().silent(true))
        .await
        .unwrap();

    assert_eq!(simulator.delivered_count(), 2);
    assert_eq!(simulator.active_count(), 2);

    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, SimulationEventKind::Delivered(handle.id()));
    assert!(event.message.contains("Hello"));

    let shown = simulator.notification(&handle.id()).unwrap();
    assert_eq!(shown.title, "Hello");
    assert_eq!(shown.native_id, handle.native_id());
    assert!(shown.options.close_on_click);
}

#[tokio::test]
async fn test_updates_only_touch_local_state() {
    let manager = dev_manager();
    let simulator = Arc::clone(manager.simulator().unwrap());
    let handle = manager
        .create("Download", "0%")
        .with_progress(0, 100)
        .unwrap()
        .send(DeliveryOptions::default())
        .await
        .unwrap();

    handle
        .update_progress_with(40, None, Some("40%".into()))
        .await
        .unwrap();
    let shown = simulator.notification(&handle.id()).unwrap();
    assert_eq!(shown.progress.unwrap().current, 40);
    assert_eq!(shown.message, "40%");
    assert_eq!(shown.update_count, 1);

    handle.remove_progress(Some("Done".into()), false).await.unwrap();
    let shown = simulator.notification(&handle.id()).unwrap();
    assert_eq!(shown.style, NotificationStyle::Simple);
    assert!(shown.progress.is_none());
    assert_eq!(shown.message, "Done");
}

#[tokio::test]
async fn test_press_button_runs_callback() {
    let manager = dev_manager();
    let pressed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&pressed);
    let handle = manager
        .create("Confirm?", "Tap a button")
        .add_button("Yes", move || flag.store(true, Ordering::SeqCst))
        .unwrap()
        .send(DeliveryOptions::default())
        .await
        .unwrap();

    let simulator = manager.simulator().unwrap();
    simulator.press_button(&handle.id(), 0).unwrap();
    assert!(pressed.load(Ordering::SeqCst));
    assert!(simulator.press_button(&handle.id(), 1).is_err());
}

#[tokio::test]
async fn test_channels_and_opened_notification() {
    let manager = dev_manager();
    let simulator = Arc::clone(manager.simulator().unwrap());

    manager
        .create_channel(NotificationChannel::new("c1", "Alerts", Importance::High))
        .await
        .unwrap();
    assert!(simulator.channel("c1").is_some());
    assert!(manager.channels().get("c1").is_some());

    manager.delete_channel("c1").await.unwrap();
    assert!(simulator.channel("c1").is_none());
    assert!(manager.channels().get("c1").is_none());

    assert_eq!(manager.opened_notification().await.unwrap(), None);
    simulator.set_opened_notification(Some("download-1".into()));
    assert_eq!(
        manager.opened_notification().await.unwrap().as_deref(),
        Some("download-1")
    );
}
