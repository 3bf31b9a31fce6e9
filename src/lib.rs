//! Android notifications for host UI applications
//!
//! A fluent [`NotificationBuilder`] assembles a notification, [`NotifyManager`]
//! sends it through the backend selected for the host platform, and the
//! returned [`NotificationHandle`] updates or cancels it later.
//!
//! On Android, delivery goes through a host-supplied [`NativeBridge`] wrapping the
//! native notification library. On every other platform the crate runs in dev
//! mode: a [`SimulatedSender`] keeps notifications in memory and broadcasts an
//! acknowledgment for each call.

pub mod backends;
pub mod components;
mod manager;

pub use backends::*;
pub use components::*;
pub use manager::NotifyManager;

use std::sync::Arc;

use manager::NotifyContext;

/// Builder for creating notifications with fluent API.
///
/// Obtained from [`NotifyManager::create`]. Each call consumes and returns the
/// builder; calls that can violate a constraint return a `Result` instead.
pub struct NotificationBuilder {
    context: Arc<NotifyContext>,
    content: NotificationContent,
    channel_id: String,
    name: Option<String>,
}

impl NotificationBuilder {
    pub(crate) fn new(
        context: Arc<NotifyContext>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let content = NotificationContent::new(title, message);
        tracing::debug!(title = %content.title, "Notification builder created");
        Self {
            channel_id: context.channels.default_id().to_string(),
            context,
            content,
            name: None,
        }
    }

    /// Small icon shown in the status bar
    pub fn set_icon(mut self, icon: impl Into<ImageSource>) -> Self {
        let icon = icon.into();
        tracing::debug!(icon = %icon.to_native(), "Icon set");
        self.content.app_icon = Some(icon);
        self
    }

    /// Add an action button. At most [`MAX_BUTTONS`] are allowed.
    pub fn add_button(
        mut self,
        label: impl Into<String>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> NotificationResult<Self> {
        let label = label.into();
        if self.content.buttons.len() >= MAX_BUTTONS {
            tracing::warn!(label = %label, "Button limit reached");
            return Err(NotificationError::invalid(
                "buttons",
                format!("at most {} buttons per notification", MAX_BUTTONS),
            ));
        }
        tracing::debug!(label = %label, "Button added");
        self.content.buttons.push(NotificationButton::new(label, callback));
        Ok(self)
    }

    /// Determinate progress bar at `current` out of `max`
    pub fn with_progress(mut self, current: i64, max: i64) -> NotificationResult<Self> {
        let bounds = ProgressBounds::new(current, max)?;
        tracing::debug!(current, max, "Progress bar configured");
        self.content.progress = Some(bounds);
        Ok(self)
    }

    /// Progress bar without a known end
    pub fn with_indeterminate_progress(mut self) -> Self {
        self.content.progress = Some(ProgressBounds::indeterminate());
        self
    }

    /// Large icon on the right of the notification
    pub fn set_large_icon(mut self, image: impl Into<ImageSource>) -> Self {
        let image = image.into();
        tracing::debug!(image = %image.to_native(), "Large icon set");
        self.content.large_icon = Some(image);
        self
    }

    /// Picture shown when the notification is expanded
    pub fn set_big_picture(mut self, image: impl Into<ImageSource>) -> Self {
        let image = image.into();
        tracing::debug!(image = %image.to_native(), "Big picture set");
        self.content.big_picture = Some(image);
        self
    }

    /// Long text shown when the notification is expanded
    pub fn set_big_text(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        tracing::debug!(chars = body.chars().count(), "Big text set");
        self.content.big_text = Some(body);
        self
    }

    /// Append one inbox line
    pub fn add_line(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        tracing::debug!(line = %line, "Inbox line added");
        self.content.inbox_lines.push(line);
        self
    }

    /// Replace all inbox lines
    pub fn set_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.inbox_lines = lines.into_iter().map(Into::into).collect();
        tracing::debug!(lines = self.content.inbox_lines.len(), "Inbox lines set");
        self
    }

    /// Post on this channel instead of the default one
    pub fn channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Name reported by `opened_notification` when this notification opens the app
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn content(&self) -> &NotificationContent {
        &self.content
    }

    /// Style the notification will be sent with
    pub fn style(&self) -> NotificationStyle {
        self.context.style_policy.resolve(&self.content)
    }

    /// Finalize into an immutable request without sending it
    pub fn build(&self) -> NotificationRequest {
        NotificationRequest {
            id: NotificationId::generate(),
            name: self.name.clone(),
            channel: self.context.channels.resolve(&self.channel_id),
            content: self.content.clone(),
            style: self.style(),
            options: DeliveryOptions::default(),
        }
    }

    /// Build and post the notification
    pub async fn send(self, options: DeliveryOptions) -> NotificationResult<NotificationHandle> {
        let request = NotificationRequest {
            options,
            ..self.build()
        };
        tracing::info!(
            id = %request.id,
            title = %request.content.title,
            style = %request.style,
            channel = %request.channel.id,
            silent = options.silent,
            persistent = options.persistent,
            "Sending notification"
        );

        let sender = Arc::clone(&self.context.sender);
        let receipt = sender.deliver(&request).await.map_err(|e| {
            tracing::error!(id = %request.id, error = %e, "Failed to send notification");
            e
        })?;

        Ok(NotificationHandle::new(
            &request,
            &receipt,
            sender,
            self.context.dismiss_delay,
        ))
    }
}

impl std::fmt::Debug for NotificationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBuilder")
            .field("content", &self.content)
            .field("channel_id", &self.channel_id)
            .field("name", &self.name)
            .finish()
    }
}
