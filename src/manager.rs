// Entry point for applications: permissions, channels, builders and bulk operations

use std::sync::Arc;
use std::time::Duration;

use crate::NotificationBuilder;
use crate::backends::{NativeBridge, SenderFactory, SimulatedSender};
use crate::components::{
    ChannelRegistry, DeliveryOptions, NotificationChannel, NotificationHandle, NotificationResult,
    NotificationSender, NotifyConfig, Platform, StylePolicy,
};

/// Shared by the manager and every builder it hands out
pub(crate) struct NotifyContext {
    pub(crate) sender: Arc<dyn NotificationSender>,
    pub(crate) channels: ChannelRegistry,
    pub(crate) style_policy: StylePolicy,
    pub(crate) dismiss_delay: Duration,
}

/// Notification manager for one application
pub struct NotifyManager {
    context: Arc<NotifyContext>,
    simulator: Option<Arc<SimulatedSender>>,
    platform: Platform,
}

impl NotifyManager {
    /// Create a manager for `config.platform`. On Android the native bridge is
    /// required; on every other platform notifications are simulated.
    pub fn new(
        config: NotifyConfig,
        bridge: Option<Arc<dyn NativeBridge>>,
    ) -> NotificationResult<Self> {
        tracing::info!(platform = %config.platform, "Initializing notifications");
        let selection = SenderFactory::select(&config, bridge)?;
        let mut manager = Self::with_sender(config, selection.sender);
        manager.simulator = selection.simulator;
        Ok(manager)
    }

    /// Create a manager around an explicit sender
    pub fn with_sender(config: NotifyConfig, sender: Arc<dyn NotificationSender>) -> Self {
        let context = NotifyContext {
            channels: ChannelRegistry::new(config.default_channel.clone()),
            style_policy: config.style_policy(),
            dismiss_delay: config.dismiss_delay(),
            sender,
        };
        Self {
            context: Arc::new(context),
            simulator: None,
            platform: config.platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_dev_mode(&self) -> bool {
        !self.platform.is_target()
    }

    /// Simulated backend, present in dev mode
    pub fn simulator(&self) -> Option<&Arc<SimulatedSender>> {
        self.simulator.as_ref()
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.context.channels
    }

    pub fn style_policy(&self) -> &StylePolicy {
        &self.context.style_policy
    }

    /// Whether posting notifications is currently allowed. No side effects.
    pub async fn check_permission(&self) -> NotificationResult<bool> {
        tracing::debug!("Checking notification permission");
        self.context.sender.check_permission().await
    }

    /// Prompt for the notification permission where the OS requires it
    pub async fn request_permission(&self) -> NotificationResult<bool> {
        tracing::info!("Requesting notification permission");
        self.context.sender.request_permission().await
    }

    /// Start building a notification
    pub fn create(&self, title: impl Into<String>, message: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(Arc::clone(&self.context), title, message)
    }

    /// Send a simple notification on the default channel
    pub async fn send(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> NotificationResult<NotificationHandle> {
        self.create(title, message)
            .send(DeliveryOptions::default())
            .await
    }

    /// Send a simple notification on `channel_id` with explicit flags
    pub async fn send_on(
        &self,
        channel_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        options: DeliveryOptions,
    ) -> NotificationResult<NotificationHandle> {
        self.create(title, message)
            .channel(channel_id)
            .send(options)
            .await
    }

    /// Register a channel with the OS. Channels are immutable once created;
    /// registering an existing id again keeps the original settings.
    pub async fn create_channel(&self, channel: NotificationChannel) -> NotificationResult<()> {
        tracing::info!(channel = %channel.id, name = %channel.name, importance = %channel.importance, "Creating channel");
        if self.context.channels.is_registered(&channel.id) {
            tracing::debug!(channel = %channel.id, "Channel exists, keeping original settings");
            return Ok(());
        }
        self.context.sender.create_channel(&channel).await?;
        self.context.channels.register(channel);
        Ok(())
    }

    pub async fn delete_channel(&self, channel_id: &str) -> NotificationResult<()> {
        tracing::info!(channel = %channel_id, "Deleting channel");
        self.context.sender.delete_channel(channel_id).await?;
        self.context.channels.remove(channel_id);
        Ok(())
    }

    pub async fn delete_all_channels(&self) -> NotificationResult<()> {
        tracing::info!("Deleting all channels");
        self.context.sender.delete_all_channels().await?;
        self.context.channels.clear();
        Ok(())
    }

    /// Remove every notification this process posted
    pub async fn cancel_all(&self) -> NotificationResult<()> {
        tracing::info!("Cancelling all notifications");
        self.context.sender.cancel_all().await
    }

    /// Name of the notification whose tap opened the app, if any
    pub async fn opened_notification(&self) -> NotificationResult<Option<String>> {
        let name = self.context.sender.opened_notification().await?;
        match &name {
            Some(name) => tracing::info!(name = %name, "App opened from notification"),
            None => tracing::debug!("App not opened from a notification"),
        }
        Ok(name)
    }
}

impl std::fmt::Debug for NotifyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyManager")
            .field("platform", &self.platform)
            .field("channels", &self.context.channels.ids())
            .field("dev_mode", &self.is_dev_mode())
            .finish()
    }
}
