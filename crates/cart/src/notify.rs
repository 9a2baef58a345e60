//! Transient user-facing notifications.
//!
//! Notifications are a fire-and-forget sink: callers enqueue a message
//! and never await anything. Messages stack rather than overwriting each
//! other, each carries its own expiry deadline, and a manual dismissal
//! removes the entry outright so no pending expiry can race it. The
//! emitter never touches cart state.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Unique handle for one queued notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// Bootstrap icon name for the toast.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle-fill",
            Self::Error => "exclamation-circle-fill",
            Self::Info => "info-circle-fill",
        }
    }

    /// Accent color for the toast icon.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
            Self::Info => "#3b82f6",
        }
    }

    /// CSS class suffix for the toast container.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// One queued toast message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Queue of active notifications shared between the cart service and the
/// embedding page.
///
/// Cheaply cloneable; clones share the same queue.
#[derive(Debug, Clone)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
    lifetime: Duration,
}

impl Notifier {
    /// Create a notifier whose messages live for `lifetime` (display time
    /// plus exit transition) before `expire_due` collects them.
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            queue: Arc::new(Mutex::new(Vec::new())),
            lifetime,
        }
    }

    /// Enqueue a message. Fire-and-forget; the returned id is only needed
    /// to dismiss the message early.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let created_at = Utc::now();
        let notification = Notification {
            id: NotificationId::generate(),
            message: message.into(),
            kind,
            created_at,
            expires_at: created_at + self.lifetime,
        };
        let id = notification.id;
        tracing::debug!(%id, ?kind, "Notification queued");
        self.lock().push(notification);
        id
    }

    /// Remove one notification by id, cancelling its pending expiry.
    /// Returns whether it was still queued.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut queue = self.lock();
        let before = queue.len();
        queue.retain(|n| n.id != id);
        queue.len() < before
    }

    /// Remove every notification whose deadline has passed, returning how
    /// many were collected.
    pub fn expire_due(&self, now: DateTime<Utc>) -> usize {
        let mut queue = self.lock();
        let before = queue.len();
        queue.retain(|n| n.expires_at > now);
        before - queue.len()
    }

    /// Snapshot of the active notifications in arrival order.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Whether any notifications are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::milliseconds(3300))
    }
}
