// Platform selection and the sender seam between handles and the OS
// Requests are immutable once built; senders own the mapping to native calls

use std::future::Future;
use std::pin::Pin;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::channel::NotificationChannel;
use super::content::{NotificationContent, NotificationStyle, ProgressBounds};
use super::{NotificationId, NotificationResult};

/// Platform reported by the host UI framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
    MacOS,
    Windows,
    Linux,
    Web,
    #[default]
    Unknown,
}

impl Platform {
    /// Whether notifications are posted for real on this platform.
    /// Every other platform runs in dev mode.
    pub fn is_target(&self) -> bool {
        matches!(self, Platform::Android)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::MacOS => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Web => "web",
            Platform::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags applied when a notification is posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    /// Post without sound or heads-up popup
    pub silent: bool,
    /// User cannot swipe it away
    pub persistent: bool,
    /// Dismiss when tapped
    pub close_on_click: bool,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            silent: false,
            persistent: false,
            close_on_click: true,
        }
    }
}

impl DeliveryOptions {
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn close_on_click(mut self, close_on_click: bool) -> Self {
        self.close_on_click = close_on_click;
        self
    }
}

/// Finalized notification ready for delivery
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub id: NotificationId,
    /// Name reported back when this notification opens the app
    pub name: Option<String>,
    pub channel: NotificationChannel,
    pub content: NotificationContent,
    pub style: NotificationStyle,
    pub options: DeliveryOptions,
}

impl NotificationRequest {
    /// Progress bounds, only present for progress-style requests
    pub fn progress(&self) -> Option<ProgressBounds> {
        match self.style {
            NotificationStyle::Progress => self.content.progress,
            _ => None,
        }
    }
}

/// Receipt from a successful delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub platform: Platform,
    /// Identifier assigned by the OS or the simulator
    pub native_id: i32,
    /// Style actually posted, after any degradation
    pub style: NotificationStyle,
    pub delivered_at: SystemTime,
}

/// Change pushed to an already posted notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationUpdate {
    Title(String),
    Message(String),
    Progress {
        current: i64,
        max: i64,
        title: Option<String>,
        message: Option<String>,
    },
    IndeterminateProgress,
    RemoveProgress {
        message: Option<String>,
        show_briefly: bool,
    },
    Refresh,
}

impl NotificationUpdate {
    /// Short name used in logs and simulation events
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationUpdate::Title(_) => "title",
            NotificationUpdate::Message(_) => "message",
            NotificationUpdate::Progress { .. } => "progress",
            NotificationUpdate::IndeterminateProgress => "indeterminate_progress",
            NotificationUpdate::RemoveProgress { .. } => "remove_progress",
            NotificationUpdate::Refresh => "refresh",
        }
    }
}

/// Boxed future returned by sender operations
pub type SenderFuture<'a, T> = Pin<Box<dyn Future<Output = NotificationResult<T>> + Send + 'a>>;

/// Capability interface over the real OS path and the dev-mode simulator
pub trait NotificationSender: Send + Sync {
    fn platform(&self) -> Platform;

    fn check_permission(&self) -> SenderFuture<'_, bool>;

    /// Prompt for permission where the OS requires it
    fn request_permission(&self) -> SenderFuture<'_, bool>;

    fn deliver<'a>(&'a self, request: &'a NotificationRequest) -> SenderFuture<'a, DeliveryReceipt>;

    fn update<'a>(
        &'a self,
        id: &'a NotificationId,
        update: &'a NotificationUpdate,
    ) -> SenderFuture<'a, ()>;

    fn cancel<'a>(&'a self, id: &'a NotificationId) -> SenderFuture<'a, ()>;

    fn cancel_all(&self) -> SenderFuture<'_, ()>;

    fn create_channel<'a>(&'a self, channel: &'a NotificationChannel) -> SenderFuture<'a, ()>;

    fn delete_channel<'a>(&'a self, channel_id: &'a str) -> SenderFuture<'a, ()>;

    fn delete_all_channels(&self) -> SenderFuture<'_, ()>;

    /// Name of the notification whose tap launched the app, if any
    fn opened_notification(&self) -> SenderFuture<'_, Option<String>>;
}
