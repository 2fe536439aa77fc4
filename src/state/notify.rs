//! User-visible notifications raised by the request pipeline.
//!
//! DESIGN
//! ======
//! The pipeline only knows the `Notifier` trait. The app provides a
//! `RwSignal<NotificationState>` that queues toasts and dismisses each one
//! after its duration.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::time::Duration;

use leptos::prelude::*;

/// How long an error toast stays on screen.
pub const NOTIFY_DURATION: Duration = Duration::from_millis(5_000);

/// Toast style. The pipeline only raises errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Notification {
    /// Error toast with the standard auto-dismiss delay.
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: Severity::Error, duration: NOTIFY_DURATION }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier {
    fn show(&self, notification: Notification);
}

/// A queued notification with a stable id for dismissal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Visible toast queue, oldest first.
#[derive(Clone, Debug, Default)]
pub struct NotificationState {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

impl NotificationState {
    /// Queue a notification and return its id.
    pub fn push(&mut self, notification: Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, notification });
        id
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}

impl Notifier for RwSignal<NotificationState> {
    fn show(&self, notification: Notification) {
        let duration = notification.duration;
        let mut id = 0;
        self.update(|state| id = state.push(notification));

        #[cfg(feature = "csr")]
        {
            let toasts = *self;
            let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
            gloo_timers::callback::Timeout::new(millis, move || {
                toasts.update(|state| {
                    state.dismiss(id);
                });
            })
            .forget();
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (duration, id);
        }
    }
}
