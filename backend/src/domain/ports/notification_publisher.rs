//! Driven port for handing a message to the pub/sub service.
//!
//! Adapters translate their SDK's results into a [`PublishReceipt`] (the
//! service answered) or a [`NotificationPublishError`] (the call faulted). The
//! domain never inspects the receipt body.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;
use crate::domain::{Message, TopicArn};

/// HTTP status the pub/sub service reports for an accepted publish.
pub const PUBLISH_OK_STATUS: u16 = 200;

/// Status code and response object reported by the pub/sub service.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReceipt {
    /// Upstream HTTP status code.
    pub status: u16,
    /// Upstream response object, passed through uninterpreted.
    pub body: Value,
}

impl PublishReceipt {
    /// Receipt for an accepted publish.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self {
            status: PUBLISH_OK_STATUS,
            body,
        }
    }

    /// Whether the upstream service reported HTTP 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == PUBLISH_OK_STATUS
    }
}

define_port_error! {
    /// Faults raised while talking to the pub/sub service.
    pub enum NotificationPublishError {
        /// The request never produced a response (DNS, TLS, connection reset).
        Transport { message: String } =>
            "pub/sub transport failed: {message}",
        /// The client gave up waiting for the service.
        Timeout { message: String } =>
            "pub/sub publish timed out: {message}",
        /// The service answered with an error (invalid topic, throttling, auth).
        Service { code: String, message: String } =>
            "pub/sub service rejected the publish ({code}): {message}",
        /// The request could not be built or the response could not be read.
        Request { message: String } =>
            "pub/sub request failed: {message}",
    }
}

/// Port for publishing one message to one topic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Submit `message` to `topic` and report what the service answered.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationPublishError`] when the call faults before a
    /// receipt exists.
    async fn publish(
        &self,
        topic: &TopicArn,
        message: &Message,
    ) -> Result<PublishReceipt, NotificationPublishError>;
}
