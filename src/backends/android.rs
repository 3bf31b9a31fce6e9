// Android backend - delegates to the wrapped native notification library
// The JNI bridge is supplied by the host; this module owns request mapping,
// SDK capability checks and error translation

use std::sync::Arc;
use std::time::SystemTime;

use dashmap::DashMap;

use crate::components::{
    ButtonCallback, DegradationMode, DeliveryReceipt, Importance, NotificationChannel,
    NotificationError, NotificationId, NotificationRequest, NotificationResult, NotificationSender,
    NotificationStyle, NotificationUpdate, Platform, SenderFuture, StylePolicy,
};

/// SDK level that introduced the runtime POST_NOTIFICATIONS permission
pub const POST_NOTIFICATIONS_MIN_SDK: u32 = 33;

/// SDK level that introduced notification channels
pub const CHANNELS_MIN_SDK: u32 = 26;

/// Errors reported by the native bridge
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("native library unavailable: {0}")]
    Unavailable(String),
    #[error("unsupported feature: {0}")]
    Unsupported(String),
    #[error("unknown native notification {0}")]
    UnknownNotification(i32),
    #[error("{0}")]
    Failed(String),
}

impl From<BridgeError> for NotificationError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::PermissionDenied(message) => NotificationError::PermissionDenied(message),
            BridgeError::Unavailable(message) => NotificationError::DependencyUnavailable(message),
            BridgeError::Unsupported(feature) => NotificationError::PlatformNotSupported {
                platform: Platform::Android.to_string(),
                feature,
            },
            BridgeError::UnknownNotification(native_id) => NotificationError::Platform {
                platform: Platform::Android.to_string(),
                message: format!("unknown native notification {}", native_id),
            },
            BridgeError::Failed(message) => NotificationError::Platform {
                platform: Platform::Android.to_string(),
                message,
            },
        }
    }
}

/// Button as handed to the native library
#[derive(Clone)]
pub struct NativeButton {
    pub label: String,
    pub callback: ButtonCallback,
}

impl std::fmt::Debug for NativeButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeButton")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Arguments for one native post. Only the fields relevant to `style` are set.
#[derive(Debug, Clone, Default)]
pub struct NativePayload {
    pub name: Option<String>,
    pub title: String,
    pub message: String,
    pub channel_id: String,
    pub channel_name: String,
    pub importance: Importance,
    pub sound: bool,
    pub vibration: bool,
    pub style: &'static str,
    pub app_icon: Option<String>,
    pub progress_current_value: Option<i64>,
    pub progress_max_value: Option<i64>,
    pub large_icon_path: Option<String>,
    pub big_picture_path: Option<String>,
    pub body: Option<String>,
    pub lines_txt: Option<String>,
    pub buttons: Vec<NativeButton>,
    pub silent: bool,
    pub persistent: bool,
    pub close_on_click: bool,
}

impl NativePayload {
    pub fn from_request(request: &NotificationRequest, style: NotificationStyle) -> Self {
        let content = &request.content;
        let mut payload = NativePayload {
            name: request.name.clone(),
            title: content.title.clone(),
            message: content.message.clone(),
            channel_id: request.channel.id.clone(),
            channel_name: request.channel.name.clone(),
            importance: request.channel.importance,
            sound: request.channel.sound && !request.options.silent,
            vibration: request.channel.vibration && !request.options.silent,
            style: style.as_str(),
            app_icon: content.app_icon.as_ref().map(|icon| icon.to_native()),
            buttons: content
                .buttons
                .iter()
                .map(|b| NativeButton {
                    label: b.label.clone(),
                    callback: Arc::clone(&b.callback),
                })
                .collect(),
            silent: request.options.silent,
            persistent: request.options.persistent,
            close_on_click: request.options.close_on_click,
            ..Default::default()
        };

        match style {
            NotificationStyle::Progress => {
                if let Some(bounds) = content.progress {
                    payload.progress_current_value = Some(bounds.current);
                    payload.progress_max_value = Some(bounds.max);
                }
            },
            NotificationStyle::LargeIcon => {
                payload.large_icon_path = content.large_icon.as_ref().map(|i| i.to_native());
            },
            NotificationStyle::BigPicture => {
                payload.big_picture_path = content.big_picture.as_ref().map(|i| i.to_native());
            },
            NotificationStyle::BothImages => {
                payload.large_icon_path = content.large_icon.as_ref().map(|i| i.to_native());
                payload.big_picture_path = content.big_picture.as_ref().map(|i| i.to_native());
            },
            NotificationStyle::BigText => {
                payload.body = content.big_text.clone();
            },
            NotificationStyle::Inbox => {
                payload.lines_txt = Some(content.inbox_text());
            },
            NotificationStyle::Simple => {},
        }

        payload
    }
}

/// The wrapped native notification library, reached through the host's JNI bridge.
/// Calls are synchronous and expected to return quickly.
pub trait NativeBridge: Send + Sync {
    /// `Build.VERSION.SDK_INT` of the device
    fn sdk_version(&self) -> u32;

    fn has_post_permission(&self) -> Result<bool, BridgeError>;

    /// Show the OS permission dialog
    fn request_post_permission(&self) -> Result<(), BridgeError>;

    /// Post a notification, returning the native notification id
    fn post(&self, payload: &NativePayload) -> Result<i32, BridgeError>;

    fn update(&self, native_id: i32, update: &NotificationUpdate) -> Result<(), BridgeError>;

    fn cancel(&self, native_id: i32) -> Result<(), BridgeError>;

    fn cancel_all(&self) -> Result<(), BridgeError>;

    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), BridgeError>;

    fn delete_channel(&self, channel_id: &str) -> Result<(), BridgeError>;

    fn delete_all_channels(&self) -> Result<(), BridgeError>;

    /// Name attached to the notification whose tap launched the app
    fn opened_notification_name(&self) -> Result<Option<String>, BridgeError>;
}

/// Styles a device can render, by SDK level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSupport {
    sdk: u32,
}

impl StyleSupport {
    pub fn for_sdk(sdk: u32) -> Self {
        Self { sdk }
    }

    pub fn min_sdk(style: NotificationStyle) -> u32 {
        match style {
            NotificationStyle::Simple => 1,
            NotificationStyle::LargeIcon => 11,
            NotificationStyle::Progress => 14,
            NotificationStyle::Inbox
            | NotificationStyle::BigText
            | NotificationStyle::BigPicture
            | NotificationStyle::BothImages => 16,
        }
    }

    pub fn supports(&self, style: NotificationStyle) -> bool {
        self.sdk >= Self::min_sdk(style)
    }

    /// Nearest style the device renders for `request`, walking `policy`
    /// from the requested style downwards
    pub fn degrade(
        &self,
        request: &NotificationRequest,
        policy: &StylePolicy,
    ) -> NotificationStyle {
        let order = policy.precedence();
        let start = order.iter().position(|s| *s == request.style).unwrap_or(0);
        order[start..]
            .iter()
            .copied()
            .find(|s| self.supports(*s) && request.content.supports_style(*s))
            .unwrap_or(NotificationStyle::Simple)
    }
}

/// Sender that posts through the native library
pub struct AndroidSender {
    bridge: Arc<dyn NativeBridge>,
    native_ids: DashMap<NotificationId, i32>,
    degradation: DegradationMode,
    style_policy: StylePolicy,
}

impl AndroidSender {
    pub fn new(
        bridge: Arc<dyn NativeBridge>,
        degradation: DegradationMode,
        style_policy: StylePolicy,
    ) -> Self {
        Self {
            bridge,
            native_ids: DashMap::new(),
            degradation,
            style_policy,
        }
    }

    fn native_id(&self, id: &NotificationId) -> NotificationResult<i32> {
        self.native_ids
            .get(id)
            .map(|entry| *entry.value())
            .ok_or_else(|| NotificationError::HandleInvalidated {
                id: *id,
                state: "unknown to the native library".to_string(),
            })
    }

    // Unknown ids mean the OS already dropped the notification
    fn map_bridge_error(&self, id: &NotificationId, error: BridgeError) -> NotificationError {
        match error {
            BridgeError::UnknownNotification(native_id) => {
                self.native_ids.remove(id);
                NotificationError::HandleInvalidated {
                    id: *id,
                    state: format!("native notification {} is gone", native_id),
                }
            },
            other => other.into(),
        }
    }

    fn resolve_style(&self, request: &NotificationRequest) -> NotificationResult<NotificationStyle> {
        let sdk = self.bridge.sdk_version();
        let support = StyleSupport::for_sdk(sdk);
        if support.supports(request.style) {
            return Ok(request.style);
        }
        match self.degradation {
            DegradationMode::Fail => Err(NotificationError::PlatformNotSupported {
                platform: format!("android (sdk {})", sdk),
                feature: format!("{} style", request.style),
            }),
            DegradationMode::Degrade => {
                let degraded = support.degrade(request, &self.style_policy);
                tracing::warn!(
                    sdk,
                    requested = %request.style,
                    degraded = %degraded,
                    "Style not supported by device, degrading"
                );
                Ok(degraded)
            },
        }
    }
}

impl NotificationSender for AndroidSender {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn check_permission(&self) -> SenderFuture<'_, bool> {
        Box::pin(async move {
            let sdk = self.bridge.sdk_version();
            if sdk < POST_NOTIFICATIONS_MIN_SDK {
                tracing::debug!(sdk, "Notification permission implicit below SDK 33");
                return Ok(true);
            }
            match self.bridge.has_post_permission() {
                Ok(granted) => {
                    tracing::info!(granted, "Notification permission checked");
                    Ok(granted)
                },
                Err(e) => {
                    tracing::error!(error = %e, "Failed to check notification permission");
                    Ok(false)
                },
            }
        })
    }

    fn request_permission(&self) -> SenderFuture<'_, bool> {
        Box::pin(async move {
            let sdk = self.bridge.sdk_version();
            if sdk < POST_NOTIFICATIONS_MIN_SDK {
                tracing::info!(sdk, "Notification permission not required");
                return Ok(true);
            }
            self.bridge.request_post_permission().map_err(|e| {
                tracing::error!(error = %e, "Failed to request notification permission");
                NotificationError::PermissionDenied(format!("permission request failed: {}", e))
            })?;
            let granted = self.bridge.has_post_permission()?;
            tracing::info!(granted, "Notification permission requested");
            Ok(granted)
        })
    }

    fn deliver<'a>(&'a self, request: &'a NotificationRequest) -> SenderFuture<'a, DeliveryReceipt> {
        Box::pin(async move {
            let style = self.resolve_style(request)?;
            let payload = NativePayload::from_request(request, style);
            tracing::debug!(
                id = %request.id,
                style = payload.style,
                channel = %payload.channel_id,
                buttons = payload.buttons.len(),
                "Posting native notification"
            );

            let native_id = self.bridge.post(&payload).map_err(|e| {
                tracing::error!(id = %request.id, error = %e, "Failed to post notification");
                NotificationError::from(e)
            })?;
            self.native_ids.insert(request.id, native_id);

            tracing::info!(id = %request.id, native_id, title = %request.content.title, "Notification sent");
            Ok(DeliveryReceipt {
                platform: Platform::Android,
                native_id,
                style,
                delivered_at: SystemTime::now(),
            })
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a NotificationId,
        update: &'a NotificationUpdate,
    ) -> SenderFuture<'a, ()> {
        Box::pin(async move {
            let native_id = self.native_id(id)?;
            self.bridge
                .update(native_id, update)
                .map_err(|e| self.map_bridge_error(id, e))?;
            tracing::debug!(id = %id, native_id, update = update.kind(), "Native notification updated");
            Ok(())
        })
    }

    fn cancel<'a>(&'a self, id: &'a NotificationId) -> SenderFuture<'a, ()> {
        Box::pin(async move {
            let native_id = self.native_id(id)?;
            self.bridge
                .cancel(native_id)
                .map_err(|e| self.map_bridge_error(id, e))?;
            self.native_ids.remove(id);
            Ok(())
        })
    }

    fn cancel_all(&self) -> SenderFuture<'_, ()> {
        Box::pin(async move {
            self.bridge.cancel_all()?;
            self.native_ids.clear();
            Ok(())
        })
    }

    fn create_channel<'a>(&'a self, channel: &'a NotificationChannel) -> SenderFuture<'a, ()> {
        Box::pin(async move {
            let sdk = self.bridge.sdk_version();
            if sdk < CHANNELS_MIN_SDK {
                tracing::debug!(sdk, channel = %channel.id, "Channels not supported, skipping");
                return Ok(());
            }
            self.bridge.create_channel(channel)?;
            Ok(())
        })
    }

    fn delete_channel<'a>(&'a self, channel_id: &'a str) -> SenderFuture<'a, ()> {
        Box::pin(async move {
            if self.bridge.sdk_version() < CHANNELS_MIN_SDK {
                return Ok(());
            }
            self.bridge.delete_channel(channel_id)?;
            Ok(())
        })
    }

    fn delete_all_channels(&self) -> SenderFuture<'_, ()> {
        Box::pin(async move {
            if self.bridge.sdk_version() < CHANNELS_MIN_SDK {
                return Ok(());
            }
            self.bridge.delete_all_channels()?;
            Ok(())
        })
    }

    fn opened_notification(&self) -> SenderFuture<'_, Option<String>> {
        Box::pin(async move { Ok(self.bridge.opened_notification_name()?) })
    }
}
