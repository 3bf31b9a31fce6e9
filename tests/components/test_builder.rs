//! Tests for the fluent NotificationBuilder

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use kodegen_android_notify::{
    DeliveryOptions, Importance, NotificationChannel, NotificationError, NotificationStyle,
};

use crate::support::dev_manager;

#[test]
fn test_fourth_button_is_rejected() {
    let manager = dev_manager();
    let builder = manager
        .create("Title", "Message")
        .add_button("One", || {})
        .and_then(|b| b.add_button("Two", || {}))
        .and_then(|b| b.add_button("Three", || {}))
        .expect("three buttons fit");

    let labels: Vec<&str> = builder
        .content()
        .buttons
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(labels, vec!["One", "Two", "Three"]);

    match builder.add_button("Four", || {}) {
        Err(NotificationError::InvalidBuilderState { field, .. }) => assert_eq!(field, "buttons"),
        other => panic!("expected InvalidBuilderState, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_button_callbacks_are_kept() {
    let manager = dev_manager();
    let presses = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&presses);
    let builder = manager
        .create("Title", "Message")
        .add_button("Confirm", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    builder.content().buttons[0].press();
    builder.content().buttons[0].press();
    assert_eq!(presses.load(Ordering::SeqCst), 2);
}

#[test]
fn test_with_progress_validation() {
    let manager = dev_manager();
    assert!(manager.create("T", "M").with_progress(0, 100).is_ok());
    assert!(manager.create("T", "M").with_progress(100, 100).is_ok());
    assert!(manager.create("T", "M").with_progress(0, 0).is_err());
    assert!(manager.create("T", "M").with_progress(5, -1).is_err());
    assert!(manager.create("T", "M").with_progress(-1, 100).is_err());
    assert!(manager.create("T", "M").with_progress(101, 100).is_err());
}

#[test]
fn test_style_follows_precedence() {
    let manager = dev_manager();

    let builder = manager.create("T", "M").set_big_text("long body");
    assert_eq!(builder.style(), NotificationStyle::BigText);

    let builder = manager.create("T", "M").add_line("a").add_line("b");
    assert_eq!(builder.style(), NotificationStyle::Inbox);

    // BigText outranks Inbox in the default order
    let builder = manager
        .create("T", "M")
        .add_line("a")
        .set_big_text("long body");
    assert_eq!(builder.style(), NotificationStyle::BigText);

    let builder = manager
        .create("T", "M")
        .with_progress(0, 10)
        .unwrap()
        .set_large_icon("assets/icon.png");
    assert_eq!(builder.style(), NotificationStyle::LargeIcon);

    let builder = manager
        .create("T", "M")
        .set_big_picture("assets/banner.png")
        .set_large_icon("assets/icon.png")
        .add_line("ignored");
    assert_eq!(builder.style(), NotificationStyle::BothImages);

    let builder = manager.create("T", "M").with_indeterminate_progress();
    assert_eq!(builder.style(), NotificationStyle::Progress);
}

#[test]
fn test_set_lines_replaces_lines() {
    let manager = dev_manager();
    let builder = manager
        .create("T", "M")
        .add_line("old")
        .set_lines(["a", "b"]);
    assert_eq!(builder.content().inbox_lines, vec!["a", "b"]);
}

#[tokio::test]
async fn test_build_resolves_registered_channel() {
    let manager = dev_manager();
    manager
        .create_channel(
            NotificationChannel::new("alerts", "Alerts", Importance::High).with_sound(false),
        )
        .await
        .unwrap();

    let request = manager
        .create("T", "M")
        .channel("alerts")
        .name("download-1")
        .build();
    assert_eq!(request.channel.id, "alerts");
    assert_eq!(request.channel.importance, Importance::High);
    assert!(!request.channel.sound);
    assert_eq!(request.name.as_deref(), Some("download-1"));
    assert_eq!(request.options, DeliveryOptions::default());

    let unknown = manager.create("T", "M").channel("later").build();
    assert_eq!(unknown.channel.id, "later");
    assert_eq!(unknown.channel.importance, Importance::Urgent);

    let default = manager.create("T", "M").build();
    assert_eq!(default.channel.id, "default");
}

#[test]
fn test_built_requests_get_fresh_ids() {
    let manager = dev_manager();
    let builder = manager.create("T", "M");
    assert_ne!(builder.build().id, builder.build().id);
}

#[test]
fn test_progress_only_exposed_for_progress_style() {
    let manager = dev_manager();
    let request = manager
        .create("T", "M")
        .with_progress(3, 10)
        .unwrap()
        .set_big_text("body")
        .build();
    assert_eq!(request.style, NotificationStyle::BigText);
    assert!(request.progress().is_none());
}
