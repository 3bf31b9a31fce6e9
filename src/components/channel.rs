// Notification channels: OS-level groupings sharing importance, sound and vibration

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Identifier of the channel that is always registered
pub const DEFAULT_CHANNEL_ID: &str = "default";

/// Channel importance levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Makes a sound and appears as a heads-up notification
    #[default]
    Urgent,
    High,
    Medium,
    Low,
    /// Never shown in the shade
    None,
}

impl Importance {
    /// Name understood by the native library
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Urgent => "urgent",
            Importance::High => "high",
            Importance::Medium => "medium",
            Importance::Low => "low",
            Importance::None => "none",
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification channel. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub vibration: bool,
}

fn default_true() -> bool {
    true
}

impl NotificationChannel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, importance: Importance) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            importance,
            sound: true,
            vibration: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_vibration(mut self, vibration: bool) -> Self {
        self.vibration = vibration;
        self
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_ID, "Default", Importance::Urgent)
    }
}

/// Local mirror of the channels this process registered with the OS.
/// The default channel's settings apply to any id that was never registered.
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: Arc<DashMap<String, NotificationChannel>>,
    fallback: NotificationChannel,
}

impl ChannelRegistry {
    pub fn new(default_channel: NotificationChannel) -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
            fallback: default_channel,
        }
    }

    /// Record a channel registered with the OS. An existing channel with the
    /// same id is kept, as the OS ignores re-registration of a live channel.
    pub fn register(&self, channel: NotificationChannel) -> bool {
        if self.channels.contains_key(&channel.id) {
            tracing::debug!(channel = %channel.id, "Channel already registered");
            return false;
        }
        self.channels.insert(channel.id.clone(), channel);
        true
    }

    /// Channel used when a builder names none
    pub fn default_id(&self) -> &str {
        &self.fallback.id
    }

    /// Settings of the default channel, as registered or as configured
    pub fn default_channel(&self) -> NotificationChannel {
        self.get(&self.fallback.id).unwrap_or_else(|| self.fallback.clone())
    }

    /// A channel registered with the OS
    pub fn get(&self, id: &str) -> Option<NotificationChannel> {
        self.channels.get(id).map(|entry| entry.value().clone())
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.channels.contains_key(id)
    }

    /// Resolve a channel reference for sending. Unregistered ids get an
    /// ad-hoc channel of that id carrying the default channel's settings.
    pub fn resolve(&self, id: &str) -> NotificationChannel {
        if let Some(channel) = self.get(id) {
            return channel;
        }
        let default = self.default_channel();
        if id == default.id {
            return default;
        }
        tracing::debug!(channel = %id, "Unregistered channel, using default settings");
        NotificationChannel {
            id: id.to_string(),
            name: id.to_string(),
            ..default
        }
    }

    pub fn remove(&self, id: &str) -> Option<NotificationChannel> {
        self.channels.remove(id).map(|(_, channel)| channel)
    }

    pub fn clear(&self) {
        self.channels.clear();
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.channels.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new(NotificationChannel::default())
    }
}
