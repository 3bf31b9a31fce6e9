// Delivery backends: the native Android path and the dev-mode simulator
// Exactly one is selected per manager, from the configured platform

pub mod android;
pub mod simulated;

use std::sync::Arc;

pub use android::{AndroidSender, BridgeError, NativeBridge, NativeButton, NativePayload, StyleSupport};
pub use simulated::{SimulatedNotification, SimulatedSender, SimulationEvent, SimulationEventKind};

use crate::components::{NotificationError, NotificationResult, NotificationSender, NotifyConfig};

/// Sender chosen for a manager
pub struct SenderSelection {
    pub sender: Arc<dyn NotificationSender>,
    /// Set in dev mode, for inspecting simulated state
    pub simulator: Option<Arc<SimulatedSender>>,
}

/// Factory selecting the backend once at startup
pub struct SenderFactory;

impl SenderFactory {
    /// Pick the native sender on the target platform, the simulator elsewhere.
    /// Fails with `DependencyUnavailable` on Android when no bridge was supplied.
    pub fn select(
        config: &NotifyConfig,
        bridge: Option<Arc<dyn NativeBridge>>,
    ) -> NotificationResult<SenderSelection> {
        if config.platform.is_target() {
            let bridge = bridge.ok_or_else(|| {
                tracing::error!("Native notification bridge not provided");
                NotificationError::DependencyUnavailable(
                    "no native notification bridge was provided for Android".to_string(),
                )
            })?;
            tracing::info!(sdk = bridge.sdk_version(), "Using native Android notifications");
            return Ok(SenderSelection {
                sender: Arc::new(AndroidSender::new(
                    bridge,
                    config.degradation,
                    config.style_policy(),
                )),
                simulator: None,
            });
        }

        if bridge.is_some() {
            tracing::debug!(platform = %config.platform, "Ignoring native bridge in dev mode");
        }
        tracing::warn!(platform = %config.platform, "Platform not supported, simulating notifications");
        let simulator = Arc::new(SimulatedSender::new(config.platform));
        Ok(SenderSelection {
            sender: Arc::clone(&simulator) as Arc<dyn NotificationSender>,
            simulator: Some(simulator),
        })
    }
}
