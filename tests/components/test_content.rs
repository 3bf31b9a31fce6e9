//! Tests for components/content.rs

use std::path::PathBuf;

use kodegen_android_notify::{
    ImageSource, NotificationContent, NotificationStyle, ProgressBounds, StylePolicy,
};

#[test]
fn test_progress_bounds_validation() {
    assert!(ProgressBounds::new(0, 100).is_ok());
    assert!(ProgressBounds::new(100, 100).is_ok());
    assert!(ProgressBounds::new(-1, 100).is_err());
    assert!(ProgressBounds::new(101, 100).is_err());
    assert!(ProgressBounds::new(0, 0).is_err());
    assert!(ProgressBounds::new(0, -5).is_err());

    let bounds = ProgressBounds::new(25, 100).unwrap();
    assert_eq!(bounds.fraction(), 0.25);
    assert!(!bounds.indeterminate);
    assert!(ProgressBounds::indeterminate().indeterminate);
}

#[test]
fn test_default_precedence_order() {
    let policy = StylePolicy::default();
    assert_eq!(
        policy.precedence(),
        &[
            NotificationStyle::BothImages,
            NotificationStyle::BigPicture,
            NotificationStyle::LargeIcon,
            NotificationStyle::BigText,
            NotificationStyle::Inbox,
            NotificationStyle::Progress,
            NotificationStyle::Simple,
        ]
    );
}

#[test]
fn test_style_resolution() {
    let policy = StylePolicy::default();

    let mut content = NotificationContent::new("T", "M");
    assert_eq!(policy.resolve(&content), NotificationStyle::Simple);

    content.progress = Some(ProgressBounds::new(0, 10).unwrap());
    assert_eq!(policy.resolve(&content), NotificationStyle::Progress);

    content.inbox_lines.push("line".into());
    assert_eq!(policy.resolve(&content), NotificationStyle::Inbox);

    content.big_text = Some("long".into());
    assert_eq!(policy.resolve(&content), NotificationStyle::BigText);

    content.large_icon = Some(ImageSource::parse("assets/icon.png"));
    assert_eq!(policy.resolve(&content), NotificationStyle::LargeIcon);

    content.big_picture = Some(ImageSource::parse("assets/banner.png"));
    assert_eq!(policy.resolve(&content), NotificationStyle::BothImages);

    content.large_icon = None;
    assert_eq!(policy.resolve(&content), NotificationStyle::BigPicture);
}

#[test]
fn test_custom_policy_appends_simple_and_dedups() {
    let policy = StylePolicy::new([
        NotificationStyle::Inbox,
        NotificationStyle::BigText,
        NotificationStyle::Inbox,
    ]);
    assert_eq!(
        policy.precedence(),
        &[
            NotificationStyle::Inbox,
            NotificationStyle::BigText,
            NotificationStyle::Simple
        ]
    );

    let mut content = NotificationContent::new("T", "M");
    content.inbox_lines.push("a".into());
    content.big_text = Some("b".into());
    assert_eq!(policy.resolve(&content), NotificationStyle::Inbox);

    // Styles missing from the policy are never selected
    content.big_picture = Some(ImageSource::parse("pic.png"));
    assert_eq!(policy.resolve(&content), NotificationStyle::Inbox);
}

#[test]
fn test_image_source_parsing() {
    assert_eq!(
        ImageSource::parse("assets/icon.png"),
        ImageSource::File(PathBuf::from("assets/icon.png"))
    );
    match ImageSource::parse("https://example.com/a.png") {
        ImageSource::Url(url) => assert_eq!(url.host_str(), Some("example.com")),
        other => panic!("expected url, got {:?}", other),
    }
    assert_eq!(ImageSource::parse("icon.png").to_native(), "icon.png");
}

#[test]
fn test_style_wire_names() {
    assert_eq!(NotificationStyle::BothImages.as_str(), "both_imgs");
    assert_eq!(NotificationStyle::BigText.to_string(), "big_text");
    assert_eq!(NotificationStyle::default(), NotificationStyle::Simple);
}

#[test]
fn test_inbox_text_joins_lines() {
    let mut content = NotificationContent::new("T", "M");
    content.inbox_lines = vec!["one".into(), "two".into(), "three".into()];
    assert_eq!(content.inbox_text(), "one\ntwo\nthree");
}
