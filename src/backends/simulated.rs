// Dev-mode backend - keeps notifications in memory and announces each call
// Used whenever the host platform is not Android; never touches the native bridge

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::components::{
    DeliveryOptions, DeliveryReceipt, NotificationButton, NotificationChannel, NotificationError,
    NotificationId, NotificationRequest, NotificationSender, NotificationStyle, NotificationUpdate,
    Platform, ProgressBounds, SenderFuture,
};

const EVENT_CAPACITY: usize = 64;

/// What the simulator did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEventKind {
    Delivered(NotificationId),
    Updated {
        id: NotificationId,
        update: &'static str,
    },
    Cancelled(NotificationId),
    CancelledAll {
        count: usize,
    },
    ChannelCreated(String),
    ChannelDeleted(String),
    PermissionRequested,
}

/// Transient acknowledgment a host UI can surface (toast, snackbar)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationEvent {
    pub kind: SimulationEventKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Local copy of a simulated notification
#[derive(Debug, Clone)]
pub struct SimulatedNotification {
    pub native_id: i32,
    pub name: Option<String>,
    pub channel: NotificationChannel,
    pub title: String,
    pub message: String,
    pub style: NotificationStyle,
    pub progress: Option<ProgressBounds>,
    pub options: DeliveryOptions,
    pub buttons: Vec<NotificationButton>,
    pub update_count: u64,
}

/// In-memory sender for platforms without native notifications
pub struct SimulatedSender {
    platform: Platform,
    delivered: AtomicU64,
    next_native_id: AtomicI32,
    notifications: DashMap<NotificationId, SimulatedNotification>,
    channels: DashMap<String, NotificationChannel>,
    opened: Mutex<Option<String>>,
    events: broadcast::Sender<SimulationEvent>,
}

impl SimulatedSender {
    pub fn new(platform: Platform) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            platform,
            delivered: AtomicU64::new(0),
            next_native_id: AtomicI32::new(1),
            notifications: DashMap::new(),
            channels: DashMap::new(),
            opened: Mutex::new(None),
            events,
        }
    }

    /// Number of notifications sent since creation
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Number of notifications still shown
    pub fn active_count(&self) -> usize {
        self.notifications.len()
    }

    pub fn notification(&self, id: &NotificationId) -> Option<SimulatedNotification> {
        self.notifications.get(id).map(|entry| entry.value().clone())
    }

    pub fn channel(&self, id: &str) -> Option<NotificationChannel> {
        self.channels.get(id).map(|entry| entry.value().clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SimulationEvent> {
        self.events.subscribe()
    }

    /// Simulate the user tapping button `index` of notification `id`
    pub fn press_button(&self, id: &NotificationId, index: usize) -> crate::NotificationResult<()> {
        let button = self
            .notifications
            .get(id)
            .ok_or_else(|| NotificationError::HandleInvalidated {
                id: *id,
                state: "not shown".to_string(),
            })?
            .buttons
            .get(index)
            .cloned()
            .ok_or_else(|| {
                NotificationError::invalid("button", format!("no button at index {}", index))
            })?;
        tracing::debug!(id = %id, label = %button.label, "DEV: button pressed");
        button.press();
        Ok(())
    }

    /// Simulate the app being launched from the notification named `name`
    pub fn set_opened_notification(&self, name: Option<String>) {
        *self.opened.lock() = name;
    }

    fn announce(&self, kind: SimulationEventKind, message: String) {
        tracing::info!(platform = %self.platform, "DEV: {}", message);
        // No subscribers is fine
        let _ = self.events.send(SimulationEvent {
            kind,
            message,
            at: Utc::now(),
        });
    }

    fn missing(id: &NotificationId) -> NotificationError {
        NotificationError::HandleInvalidated {
            id: *id,
            state: "not shown".to_string(),
        }
    }
}

impl NotificationSender for SimulatedSender {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn check_permission(&self) -> SenderFuture<'_, bool> {
        Box::pin(async move { Ok(true) })
    }

    fn request_permission(&self) -> SenderFuture<'_, bool> {
        Box::pin(async move {
            self.announce(
                SimulationEventKind::PermissionRequested,
                "Permission granted".to_string(),
            );
            Ok(true)
        })
    }

    fn deliver<'a>(&'a self, request: &'a NotificationRequest) -> SenderFuture<'a, DeliveryReceipt> {
        Box::pin(async move {
            let native_id = self.next_native_id.fetch_add(1, Ordering::Relaxed);
            self.notifications.insert(request.id, SimulatedNotification {
                native_id,
                name: request.name.clone(),
                channel: request.channel.clone(),
                title: request.content.title.clone(),
                message: request.content.message.clone(),
                style: request.style,
                progress: request.progress(),
                options: request.options,
                buttons: request.content.buttons.clone(),
                update_count: 0,
            });
            self.delivered.fetch_add(1, Ordering::Relaxed);
            self.announce(
                SimulationEventKind::Delivered(request.id),
                format!("{} notification: {}", request.style, request.content.title),
            );

            Ok(DeliveryReceipt {
                platform: self.platform,
                native_id,
                style: request.style,
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
            {
                let mut entry = self.notifications.get_mut(id).ok_or_else(|| Self::missing(id))?;
                let shown = entry.value_mut();
                match update {
                    NotificationUpdate::Title(title) => shown.title = title.clone(),
                    NotificationUpdate::Message(message) => shown.message = message.clone(),
                    NotificationUpdate::Progress {
                        current,
                        max,
                        title,
                        message,
                    } => {
                        shown.progress = Some(ProgressBounds {
                            current: *current,
                            max: *max,
                            indeterminate: false,
                        });
                        if let Some(title) = title {
                            shown.title = title.clone();
                        }
                        if let Some(message) = message {
                            shown.message = message.clone();
                        }
                    },
                    NotificationUpdate::IndeterminateProgress => {
                        if let Some(bounds) = shown.progress.as_mut() {
                            bounds.indeterminate = true;
                        }
                    },
                    NotificationUpdate::RemoveProgress { message, .. } => {
                        shown.style = NotificationStyle::Simple;
                        shown.progress = None;
                        if let Some(message) = message {
                            shown.message = message.clone();
                        }
                    },
                    NotificationUpdate::Refresh => {},
                }
                shown.update_count += 1;
            }
            self.announce(
                SimulationEventKind::Updated {
                    id: *id,
                    update: update.kind(),
                },
                format!("Updated {}", update.kind()),
            );
            Ok(())
        })
    }

    fn cancel<'a>(&'a self, id: &'a NotificationId) -> SenderFuture<'a, ()> {
        Box::pin(async move {
            let (_, removed) = self.notifications.remove(id).ok_or_else(|| Self::missing(id))?;
            self.announce(
                SimulationEventKind::Cancelled(*id),
                format!("Cancelled: {}", removed.title),
            );
            Ok(())
        })
    }

    fn cancel_all(&self) -> SenderFuture<'_, ()> {
        Box::pin(async move {
            let count = self.notifications.len();
            self.notifications.clear();
            self.announce(
                SimulationEventKind::CancelledAll { count },
                format!("Cancelled {} notifications", count),
            );
            Ok(())
        })
    }

    fn create_channel<'a>(&'a self, channel: &'a NotificationChannel) -> SenderFuture<'a, ()> {
        Box::pin(async move {
            self.channels.insert(channel.id.clone(), channel.clone());
            self.announce(
                SimulationEventKind::ChannelCreated(channel.id.clone()),
                format!("Channel created: {} ({})", channel.name, channel.importance),
            );
            Ok(())
        })
    }

    fn delete_channel<'a>(&'a self, channel_id: &'a str) -> SenderFuture<'a, ()> {
        Box::pin(async move {
            self.channels.remove(channel_id);
            self.announce(
                SimulationEventKind::ChannelDeleted(channel_id.to_string()),
                format!("Channel deleted: {}", channel_id),
            );
            Ok(())
        })
    }

    fn delete_all_channels(&self) -> SenderFuture<'_, ()> {
        Box::pin(async move {
            let ids: Vec<String> = self.channels.iter().map(|e| e.key().clone()).collect();
            self.channels.clear();
            for id in ids {
                self.announce(
                    SimulationEventKind::ChannelDeleted(id.clone()),
                    format!("Channel deleted: {}", id),
                );
            }
            Ok(())
        })
    }

    fn opened_notification(&self) -> SenderFuture<'_, Option<String>> {
        Box::pin(async move { Ok(self.opened.lock().clone()) })
    }
}
