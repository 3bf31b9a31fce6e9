// Notification data model: identities, channels, content, lifecycle and platform seams

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod channel;
pub mod config;
pub mod content;
pub mod lifecycle;
pub mod platform;

pub use channel::{ChannelRegistry, Importance, NotificationChannel, DEFAULT_CHANNEL_ID};
pub use config::{DegradationMode, NotifyConfig};
pub use content::{
    ButtonCallback, ImageSource, NotificationButton, NotificationContent, NotificationStyle,
    ProgressBounds, StylePolicy, MAX_BUTTONS,
};
pub use lifecycle::{HandleState, NotificationHandle, StateTransition, TransitionReason};
pub use platform::{
    DeliveryOptions, DeliveryReceipt, NotificationRequest, NotificationSender,
    NotificationUpdate, Platform, SenderFuture,
};

/// Identifier correlating a handle with one OS-level notification instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Errors raised by builders, handles, senders and configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    /// The current platform or OS version cannot render the requested feature
    #[error("{feature} is not supported on {platform}")]
    PlatformNotSupported { platform: String, feature: String },

    /// The OS denied posting rights
    #[error("notification permission denied: {0}")]
    PermissionDenied(String),

    /// The wrapped native notification library is missing or misconfigured
    #[error("native notification library unavailable: {0}")]
    DependencyUnavailable(String),

    /// Builder or handle constraint violated (button count, progress range, style)
    #[error("invalid notification state in {field}: {message}")]
    InvalidBuilderState { field: String, message: String },

    /// The handle was cancelled or dismissed and can no longer be used
    #[error("notification handle {id} invalidated ({state})")]
    HandleInvalidated { id: NotificationId, state: String },

    /// A native call reached the OS and failed
    #[error("platform error on {platform}: {message}")]
    Platform { platform: String, message: String },

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl NotificationError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        NotificationError::InvalidBuilderState {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Type alias for notification results
pub type NotificationResult<T> = Result<T, NotificationError>;
