//! Tests for components/channel.rs

use kodegen_android_notify::{ChannelRegistry, Importance, NotificationChannel, DEFAULT_CHANNEL_ID};

#[test]
fn test_registry_starts_empty_with_default_settings() {
    let registry = ChannelRegistry::default();
    assert!(registry.is_empty());
    assert!(!registry.is_registered(DEFAULT_CHANNEL_ID));
    assert_eq!(registry.default_id(), DEFAULT_CHANNEL_ID);

    let default = registry.resolve(DEFAULT_CHANNEL_ID);
    assert_eq!(default.name, "Default");
    assert_eq!(default.importance, Importance::Urgent);
    assert!(default.sound && default.vibration);
}

#[test]
fn test_registered_default_overrides_fallback_settings() {
    let registry = ChannelRegistry::default();
    assert!(registry.register(NotificationChannel::new(
        DEFAULT_CHANNEL_ID,
        "Quiet",
        Importance::Low
    )));

    assert_eq!(registry.default_channel().importance, Importance::Low);
    assert_eq!(registry.resolve("adhoc").importance, Importance::Low);
}

#[test]
fn test_channels_are_immutable_once_registered() {
    let registry = ChannelRegistry::default();
    assert!(registry.register(NotificationChannel::new("c1", "Alerts", Importance::Urgent)));
    assert!(!registry.register(NotificationChannel::new("c1", "Changed", Importance::Low)));

    let channel = registry.get("c1").unwrap();
    assert_eq!(channel.name, "Alerts");
    assert_eq!(channel.importance, Importance::Urgent);
}

#[test]
fn test_resolve_unknown_channel_uses_default_settings() {
    let registry = ChannelRegistry::new(
        NotificationChannel::new("main", "Main", Importance::Medium).with_vibration(false),
    );
    let channel = registry.resolve("adhoc");
    assert_eq!(channel.id, "adhoc");
    assert_eq!(channel.importance, Importance::Medium);
    assert!(!channel.vibration);
}

#[test]
fn test_remove_and_clear_fall_back_to_default_settings() {
    let registry = ChannelRegistry::default();
    registry.register(NotificationChannel::new("a", "A", Importance::Low));
    registry.register(NotificationChannel::new("b", "B", Importance::High));
    registry.register(NotificationChannel::new(DEFAULT_CHANNEL_ID, "Mine", Importance::Medium));
    assert_eq!(registry.ids(), vec!["a", "b", "default"]);

    assert!(registry.remove("a").is_some());
    assert!(registry.remove(DEFAULT_CHANNEL_ID).is_some());
    assert_eq!(registry.ids(), vec!["b"]);
    assert_eq!(registry.resolve(DEFAULT_CHANNEL_ID).importance, Importance::Urgent);

    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.resolve("b").importance, Importance::Urgent);
}

#[test]
fn test_importance_wire_names() {
    assert_eq!(Importance::Urgent.as_str(), "urgent");
    assert_eq!(Importance::None.to_string(), "none");
}
