// Notification handle lifecycle: created -> (updated)* -> cancelled | dismissed
// Handles are addressed by the id assigned at send time; every update targets that id

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use super::content::{NotificationStyle, ProgressBounds};
use super::platform::{DeliveryReceipt, NotificationRequest, NotificationSender, NotificationUpdate};
use super::{NotificationError, NotificationId, NotificationResult};

/// Lifecycle state of a posted notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleState {
    Active,
    /// Removed through `cancel()`
    Cancelled,
    /// Removed by the auto-dismiss timer, the user or the OS
    Dismissed,
}

impl HandleState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, HandleState::Active)
    }
}

impl std::fmt::Display for HandleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleState::Active => f.write_str("active"),
            HandleState::Cancelled => f.write_str("cancelled"),
            HandleState::Dismissed => f.write_str("dismissed"),
        }
    }
}

/// Why a transition was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionReason {
    Delivered,
    Updated(String),
    Cancelled,
    AutoDismissed,
    /// The sender no longer knows the notification (cancel_all, user swipe)
    RemovedExternally,
}

/// Entry in a handle's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from_state: Option<HandleState>,
    pub to_state: HandleState,
    pub reason: TransitionReason,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
struct HandleInner {
    title: String,
    message: String,
    style: NotificationStyle,
    progress: Option<ProgressBounds>,
    state: HandleState,
    history: Vec<StateTransition>,
    pending_dismiss: Option<JoinHandle<()>>,
}

impl HandleInner {
    fn ensure_active(&self, id: NotificationId) -> NotificationResult<()> {
        if self.state.is_terminal() {
            return Err(NotificationError::HandleInvalidated {
                id,
                state: self.state.to_string(),
            });
        }
        Ok(())
    }

    // The handle may have been cancelled or dismissed while the native call was in flight
    fn commit(&mut self, id: NotificationId, what: &str) -> NotificationResult<()> {
        self.ensure_active(id).inspect_err(|_| {
            tracing::debug!(id = %id, update = what, "Handle closed during update, dropping it");
        })
    }

    fn record(&mut self, to_state: HandleState, reason: TransitionReason) {
        self.history.push(StateTransition {
            from_state: Some(self.state),
            to_state,
            reason,
            timestamp: Utc::now(),
        });
        self.state = to_state;
    }

    fn progress_bar(&self, id: NotificationId) -> NotificationResult<ProgressBounds> {
        match (self.style, self.progress) {
            (NotificationStyle::Progress, Some(bounds)) => Ok(bounds),
            _ => Err(NotificationError::invalid(
                "style",
                format!("notification {} has no progress bar (style {})", id, self.style),
            )),
        }
    }
}

/// Caller-held reference to a posted notification.
///
/// Clones share state. Concurrent updates through clones are last-write-wins;
/// callers are expected to serialize them.
#[derive(Clone)]
pub struct NotificationHandle {
    id: NotificationId,
    name: Option<String>,
    channel_id: String,
    native_id: i32,
    dismiss_delay: Duration,
    sender: Arc<dyn NotificationSender>,
    inner: Arc<Mutex<HandleInner>>,
}

impl std::fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("NotificationHandle")
            .field("id", &self.id)
            .field("native_id", &self.native_id)
            .field("platform", &self.sender.platform())
            .field("title", &inner.title)
            .field("style", &inner.style)
            .field("state", &inner.state)
            .finish()
    }
}

impl NotificationHandle {
    pub(crate) fn new(
        request: &NotificationRequest,
        receipt: &DeliveryReceipt,
        sender: Arc<dyn NotificationSender>,
        dismiss_delay: Duration,
    ) -> Self {
        let progress = match receipt.style {
            NotificationStyle::Progress => request.content.progress,
            _ => None,
        };
        let inner = HandleInner {
            title: request.content.title.clone(),
            message: request.content.message.clone(),
            style: receipt.style,
            progress,
            state: HandleState::Active,
            history: vec![StateTransition {
                from_state: None,
                to_state: HandleState::Active,
                reason: TransitionReason::Delivered,
                timestamp: Utc::now(),
            }],
            pending_dismiss: None,
        };
        Self {
            id: request.id,
            name: request.name.clone(),
            channel_id: request.channel.id.clone(),
            native_id: receipt.native_id,
            dismiss_delay,
            sender,
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn native_id(&self) -> i32 {
        self.native_id
    }

    pub fn title(&self) -> String {
        self.inner.lock().title.clone()
    }

    pub fn message(&self) -> String {
        self.inner.lock().message.clone()
    }

    pub fn style(&self) -> NotificationStyle {
        self.inner.lock().style
    }

    pub fn progress(&self) -> Option<ProgressBounds> {
        self.inner.lock().progress
    }

    pub fn state(&self) -> HandleState {
        self.inner.lock().state
    }

    pub fn is_active(&self) -> bool {
        self.state() == HandleState::Active
    }

    pub fn history(&self) -> Vec<StateTransition> {
        self.inner.lock().history.clone()
    }

    pub async fn update_title(&self, title: impl Into<String>) -> NotificationResult<()> {
        let title = title.into();
        self.inner.lock().ensure_active(self.id)?;
        self.push(NotificationUpdate::Title(title.clone())).await?;

        let mut inner = self.inner.lock();
        inner.commit(self.id, "title")?;
        inner.title = title;
        inner.record(HandleState::Active, TransitionReason::Updated("title".into()));
        tracing::debug!(id = %self.id, title = %inner.title, "Title updated");
        Ok(())
    }

    pub async fn update_message(&self, message: impl Into<String>) -> NotificationResult<()> {
        let message = message.into();
        self.inner.lock().ensure_active(self.id)?;
        self.push(NotificationUpdate::Message(message.clone())).await?;

        let mut inner = self.inner.lock();
        inner.commit(self.id, "message")?;
        inner.message = message;
        inner.record(HandleState::Active, TransitionReason::Updated("message".into()));
        tracing::debug!(id = %self.id, "Message updated");
        Ok(())
    }

    /// Move the progress bar to `current`
    pub async fn update_progress(&self, current: i64) -> NotificationResult<()> {
        self.update_progress_with(current, None, None).await
    }

    /// Move the progress bar and optionally replace the title and message.
    /// `current` must lie within `[0, max]` as recorded when the notification was sent.
    pub async fn update_progress_with(
        &self,
        current: i64,
        title: Option<String>,
        message: Option<String>,
    ) -> NotificationResult<()> {
        let bounds = {
            let inner = self.inner.lock();
            inner.ensure_active(self.id)?;
            let bounds = inner.progress_bar(self.id)?;
            bounds.check(current)?;
            bounds
        };

        self.push(NotificationUpdate::Progress {
            current,
            max: bounds.max,
            title: title.clone(),
            message: message.clone(),
        })
        .await?;

        let mut inner = self.inner.lock();
        inner.commit(self.id, "progress")?;
        inner.progress = Some(ProgressBounds {
            current,
            max: bounds.max,
            indeterminate: false,
        });
        if let Some(title) = title {
            inner.title = title;
        }
        if let Some(message) = message {
            inner.message = message;
        }
        inner.record(HandleState::Active, TransitionReason::Updated("progress".into()));
        tracing::debug!(id = %self.id, current, max = bounds.max, "Progress updated");
        Ok(())
    }

    /// Switch the progress bar to indeterminate
    pub async fn show_infinite_progress(&self) -> NotificationResult<()> {
        {
            let inner = self.inner.lock();
            inner.ensure_active(self.id)?;
            inner.progress_bar(self.id)?;
        }
        self.push(NotificationUpdate::IndeterminateProgress).await?;

        let mut inner = self.inner.lock();
        inner.commit(self.id, "indeterminate_progress")?;
        if let Some(bounds) = inner.progress.as_mut() {
            bounds.indeterminate = true;
        }
        inner.record(
            HandleState::Active,
            TransitionReason::Updated("indeterminate_progress".into()),
        );
        tracing::debug!(id = %self.id, "Indeterminate progress shown");
        Ok(())
    }

    /// Drop the progress bar, turning the notification back into a simple one.
    ///
    /// With `show_briefly` the notification is dismissed automatically after the
    /// configured delay.
    pub async fn remove_progress(
        &self,
        message: Option<String>,
        show_briefly: bool,
    ) -> NotificationResult<()> {
        {
            let inner = self.inner.lock();
            inner.ensure_active(self.id)?;
            inner.progress_bar(self.id)?;
        }
        self.push(NotificationUpdate::RemoveProgress {
            message: message.clone(),
            show_briefly,
        })
        .await?;

        let mut inner = self.inner.lock();
        inner.commit(self.id, "remove_progress")?;
        inner.style = NotificationStyle::Simple;
        inner.progress = None;
        if let Some(message) = message {
            inner.message = message;
        }
        inner.record(
            HandleState::Active,
            TransitionReason::Updated("remove_progress".into()),
        );
        if show_briefly {
            if let Some(previous) = inner.pending_dismiss.take() {
                previous.abort();
            }
            inner.pending_dismiss = Some(self.schedule_dismiss());
        }
        tracing::debug!(id = %self.id, show_briefly, "Progress removed");
        Ok(())
    }

    /// Re-push the current content unchanged
    pub async fn refresh(&self) -> NotificationResult<()> {
        self.inner.lock().ensure_active(self.id)?;
        self.push(NotificationUpdate::Refresh).await
    }

    /// Remove the notification. The handle is invalid afterwards; a second
    /// call fails with `HandleInvalidated`.
    pub async fn cancel(&self) -> NotificationResult<()> {
        self.inner.lock().ensure_active(self.id)?;
        self.sender
            .cancel(&self.id)
            .await
            .map_err(|e| self.on_sender_error(e))?;

        let mut inner = self.inner.lock();
        inner.commit(self.id, "cancel")?;
        if let Some(pending) = inner.pending_dismiss.take() {
            pending.abort();
        }
        inner.record(HandleState::Cancelled, TransitionReason::Cancelled);
        tracing::info!(id = %self.id, title = %inner.title, "Notification cancelled");
        Ok(())
    }

    async fn push(&self, update: NotificationUpdate) -> NotificationResult<()> {
        self.sender
            .update(&self.id, &update)
            .await
            .map_err(|e| self.on_sender_error(e))
    }

    // A sender that no longer knows the id means the notification is gone
    fn on_sender_error(&self, error: NotificationError) -> NotificationError {
        if let NotificationError::HandleInvalidated { .. } = error {
            let mut inner = self.inner.lock();
            if !inner.state.is_terminal() {
                inner.record(HandleState::Dismissed, TransitionReason::RemovedExternally);
            }
        } else {
            tracing::error!(id = %self.id, error = %error, "Notification update failed");
        }
        error
    }

    fn schedule_dismiss(&self) -> JoinHandle<()> {
        let id = self.id;
        let delay = self.dismiss_delay;
        let sender = Arc::clone(&self.sender);
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if inner.lock().state.is_terminal() {
                return;
            }
            match sender.cancel(&id).await {
                Ok(()) | Err(NotificationError::HandleInvalidated { .. }) => {
                    let mut inner = inner.lock();
                    if !inner.state.is_terminal() {
                        inner.record(HandleState::Dismissed, TransitionReason::AutoDismissed);
                    }
                    inner.pending_dismiss = None;
                    tracing::debug!(id = %id, "Notification auto-dismissed");
                },
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Auto-dismiss failed");
                },
            }
        })
    }
}
