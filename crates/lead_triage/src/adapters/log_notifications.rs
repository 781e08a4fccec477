// Rust guideline compliant 2026-10-19

//! Demo adapter for the `NotificationStore` port.
//!
//! Logs each notification via `tracing` (alerts at `warn`, reminders at
//! `info`) and keeps it in memory so `unread` can answer. Never fails.

use std::cell::RefCell;

use domain::{Notification, NotificationError, NotificationKind, NotificationStore};

/// `NotificationStore` adapter that logs and remembers every notification.
#[derive(Debug, Default)]
pub struct LogNotifications {
    inner: RefCell<Vec<Notification>>,
}

impl LogNotifications {
    /// Create an empty notification log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the notification with `id` as read. Returns whether it existed.
    #[cfg(test)]
    pub fn mark_read(&self, id: uuid::Uuid) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }
}

impl NotificationStore for LogNotifications {
    async fn append(&self, notification: &Notification) -> Result<(), NotificationError> {
        match notification.kind {
            NotificationKind::Alert => tracing::warn!(
                lead_id = %notification.lead_id,
                title = %notification.title,
                message = %notification.message,
                action_date = %notification.action_date,
                "log_notifications.alert"
            ),
            NotificationKind::Reminder => tracing::info!(
                lead_id = %notification.lead_id,
                title = %notification.title,
                action_date = %notification.action_date,
                "log_notifications.reminder"
            ),
        }
        self.inner.borrow_mut().push(notification.clone());
        Ok(())
    }

    async fn unread(&self) -> Result<Vec<Notification>, NotificationError> {
        Ok(self.inner.borrow().iter().filter(|n| !n.is_read).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
