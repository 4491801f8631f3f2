//! Driving port used by inbound adapters to forward a message.

use async_trait::async_trait;

use crate::domain::{Error, Message, SendOutcome};

/// Forward one message to the configured topic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Publish `message` and report the upstream outcome.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] with [`crate::domain::ErrorCode::InternalError`]
    /// when the publisher faults; nothing is retried.
    async fn send(&self, message: Message) -> Result<SendOutcome, Error>;
}

/// Command that reports every message as delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureNotificationCommand;

#[async_trait]
impl NotificationCommand for FixtureNotificationCommand {
    async fn send(&self, _message: Message) -> Result<SendOutcome, Error> {
        Ok(SendOutcome::Delivered)
    }
}
