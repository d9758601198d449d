//! Transient user notifications ("toasts").
//!
//! Controllers push notifications here instead of failing; the presenter drains
//! and shows them. Every notification is mirrored to the log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Display time for comparison actions.
pub const SHORT_TOAST_MS: u64 = 3000;
/// Display time for profile actions.
pub const LONG_TOAST_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastStatus {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ToastStatus,
    pub duration_ms: u64,
}

/// Ordered notification queue shared by all controllers of a session.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, status: ToastStatus, title: &str, description: &str, duration_ms: u64) {
        match status {
            ToastStatus::Error => error!("{title}: {description}"),
            ToastStatus::Warning => warn!("{title}: {description}"),
            ToastStatus::Success | ToastStatus::Info => info!("{title}: {description}"),
        }

        self.lock().push(Notification {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            status,
            duration_ms,
        });
    }

    pub fn success(&self, title: &str, description: &str, duration_ms: u64) {
        self.push(ToastStatus::Success, title, description, duration_ms);
    }

    pub fn error(&self, title: &str, description: &str, duration_ms: u64) {
        self.push(ToastStatus::Error, title, description, duration_ms);
    }

    /// Notifications not yet drained, oldest first.
    pub fn pending(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|n| n.status == ToastStatus::Error)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
