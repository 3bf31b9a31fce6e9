// Manager configuration, deserializable from TOML

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::channel::NotificationChannel;
use super::content::{NotificationStyle, StylePolicy};
use super::platform::Platform;
use super::{NotificationError, NotificationResult};

/// What to do with a style the device cannot render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationMode {
    /// Fall back to the nearest style the device supports
    #[default]
    Degrade,
    /// Reject the send with `PlatformNotSupported`
    Fail,
}

/// Configuration read once when the manager is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Platform reported by the host UI framework
    pub platform: Platform,
    /// Delay before a briefly shown notification is dismissed
    pub dismiss_delay_ms: u64,
    /// Style precedence, most specific first
    pub style_precedence: Vec<NotificationStyle>,
    pub degradation: DegradationMode,
    pub default_channel: NotificationChannel,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Unknown,
            dismiss_delay_ms: 3_000,
            style_precedence: StylePolicy::default().precedence().to_vec(),
            degradation: DegradationMode::default(),
            default_channel: NotificationChannel::default(),
        }
    }
}

impl NotifyConfig {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Default::default()
        }
    }

    pub fn with_dismiss_delay(mut self, delay: Duration) -> Self {
        self.dismiss_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_style_precedence(
        mut self,
        order: impl IntoIterator<Item = NotificationStyle>,
    ) -> Self {
        self.style_precedence = order.into_iter().collect();
        self
    }

    pub fn with_degradation(mut self, degradation: DegradationMode) -> Self {
        self.degradation = degradation;
        self
    }

    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }

    pub fn style_policy(&self) -> StylePolicy {
        StylePolicy::new(self.style_precedence.iter().copied())
    }

    pub fn from_toml_str(source: &str) -> NotificationResult<Self> {
        toml::from_str(source).map_err(|e| NotificationError::Config(e.to_string()))
    }

    pub async fn load(path: impl AsRef<Path>) -> NotificationResult<Self> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            NotificationError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), platform = %config.platform, "Loaded notification config");
        Ok(config)
    }
}
