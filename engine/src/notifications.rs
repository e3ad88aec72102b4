//! Transient outcome banner with a self-contained expiry deadline.
//!
//! The deadline lives inside the banner, so replacing or clearing the banner
//! cancels its timer. An older deadline can never clear a newer notification.

use std::time::{Duration, Instant};

use reel_types::Notification;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct NotificationBanner {
    notification: Notification,
    expires_at: Instant,
}

impl NotificationBanner {
    #[must_use]
    pub fn new(notification: Notification, shown_at: Instant) -> Self {
        Self {
            notification,
            expires_at: shown_at + NOTIFICATION_TTL,
        }
    }

    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Holds at most one banner.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<NotificationBanner>,
}

impl NotificationSlot {
    /// Show `notification`, replacing (and cancelling the timer of) any previous one.
    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.current = Some(NotificationBanner::new(notification, now));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the banner once its deadline has passed. Returns true if one expired.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn current(&self) -> Option<&NotificationBanner> {
        self.current.as_ref()
    }
}
