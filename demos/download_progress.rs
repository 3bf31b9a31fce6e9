//! Example: simulated download with a progress notification
//!
//! Runs in dev mode, so every call goes to the in-memory simulator and is
//! printed as an acknowledgment instead of reaching a device.
//!
//! Run with: cargo run --example download_progress

use std::time::Duration;

use kodegen_android_notify::{
    DeliveryOptions, Importance, NotificationChannel, NotifyConfig, NotifyManager, Platform,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = NotifyConfig::for_platform(Platform::Linux)
        .with_dismiss_delay(Duration::from_secs(2));
    let manager = NotifyManager::new(config, None)?;

    let simulator = manager
        .simulator()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("expected dev mode"))?;
    let mut events = simulator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("[{}] {}", event.at.format("%H:%M:%S%.3f"), event.message);
        }
    });

    if !manager.check_permission().await? {
        manager.request_permission().await?;
    }

    manager
        .create_channel(
            NotificationChannel::new("downloads", "Downloads", Importance::Low)
                .with_description("Download progress")
                .with_vibration(false),
        )
        .await?;

    manager.send("Welcome", "Notifications are ready").await?;

    let handle = manager
        .create("Downloading report.pdf", "0%")
        .channel("downloads")
        .with_progress(0, 100)?
        .add_button("Cancel", || println!("Cancel pressed"))?
        .send(DeliveryOptions::default().persistent(true))
        .await?;

    for percent in (10..=100).step_by(10) {
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle
            .update_progress_with(percent, None, Some(format!("{}%", percent)))
            .await?;
    }

    simulator.press_button(&handle.id(), 0)?;
    handle
        .remove_progress(Some("Download complete".to_string()), true)
        .await?;

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    println!("Final state: {} ({})", handle.state(), handle.message());
    println!("Notifications sent: {}", simulator.delivered_count());

    manager.cancel_all().await?;
    Ok(())
}
