//! Tests for components/config.rs

use std::time::Duration;

use kodegen_android_notify::{
    DegradationMode, Importance, NotificationError, NotificationStyle, NotifyConfig, Platform,
};

#[test]
fn test_defaults() {
    let config = NotifyConfig::default();
    assert_eq!(config.platform, Platform::Unknown);
    assert_eq!(config.dismiss_delay(), Duration::from_secs(3));
    assert_eq!(config.degradation, DegradationMode::Degrade);
    assert_eq!(config.default_channel.id, "default");
    assert_eq!(config.style_policy().precedence()[0], NotificationStyle::BothImages);
}

#[test]
fn test_from_toml() {
    let config = NotifyConfig::from_toml_str(
        r#"
        platform = "android"
        dismiss_delay_ms = 500
        style_precedence = ["inbox", "big_text"]
        degradation = "fail"

        [default_channel]
        id = "general"
        name = "General"
        importance = "low"
        sound = false
        "#,
    )
    .unwrap();

    assert_eq!(config.platform, Platform::Android);
    assert_eq!(config.dismiss_delay(), Duration::from_millis(500));
    assert_eq!(config.degradation, DegradationMode::Fail);
    assert_eq!(
        config.style_policy().precedence(),
        &[
            NotificationStyle::Inbox,
            NotificationStyle::BigText,
            NotificationStyle::Simple
        ]
    );
    assert_eq!(config.default_channel.id, "general");
    assert_eq!(config.default_channel.importance, Importance::Low);
    assert!(!config.default_channel.sound);
    assert!(config.default_channel.vibration);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = NotifyConfig::from_toml_str(r#"platform = "web""#).unwrap();
    assert_eq!(config.platform, Platform::Web);
    assert_eq!(config.dismiss_delay_ms, 3_000);
}

#[test]
fn test_invalid_toml_is_config_error() {
    let result = NotifyConfig::from_toml_str(r#"platform = "symbian""#);
    assert!(matches!(result, Err(NotificationError::Config(_))));
}

#[tokio::test]
async fn test_load_missing_file() {
    let result = NotifyConfig::load("/nonexistent/notify.toml").await;
    assert!(matches!(result, Err(NotificationError::Config(_))));
}

#[test]
fn test_builder_methods() {
    let config = NotifyConfig::for_platform(Platform::Android)
        .with_dismiss_delay(Duration::from_millis(250))
        .with_degradation(DegradationMode::Fail)
        .with_style_precedence([NotificationStyle::Progress]);
    assert!(config.platform.is_target());
    assert_eq!(config.dismiss_delay_ms, 250);
    assert_eq!(
        config.style_policy().precedence(),
        &[NotificationStyle::Progress, NotificationStyle::Simple]
    );
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("notify-{}.toml", std::process::id()));
    std::fs::write(&path, "platform = \"android\"\ndismiss_delay_ms = 1200\n").unwrap();

    let config = tokio_test::block_on(NotifyConfig::load(&path)).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.platform, Platform::Android);
    assert_eq!(config.dismiss_delay(), Duration::from_millis(1_200));
}

#[test]
fn test_oversized_dismiss_delay_saturates() {
    let config = NotifyConfig::default().with_dismiss_delay(Duration::MAX);
    assert_eq!(config.dismiss_delay_ms, u64::MAX);
}
