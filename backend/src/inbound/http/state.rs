//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureNotificationCommand, NotificationCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Driving port behind `POST /Notification/send`.
    pub notifications: Arc<dyn NotificationCommand>,
}

impl HttpState {
    /// Construct state around a notification command.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use sns_notifier::domain::ports::FixtureNotificationCommand;
    /// use sns_notifier::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureNotificationCommand));
    /// let _notifications = state.notifications.clone();
    /// ```
    pub fn new(notifications: Arc<dyn NotificationCommand>) -> Self {
        Self { notifications }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureNotificationCommand))
    }
}
