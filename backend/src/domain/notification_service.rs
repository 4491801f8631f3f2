//! The notifier: forwards a message to the configured topic and reports the
//! upstream outcome without interpreting it.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::ports::{NotificationCommand, NotificationPublisher};
use crate::domain::{Error, Message, SendOutcome, TopicArn};

/// Pass-through notification service.
///
/// Holds the topic fixed at startup and a handle to the publisher. No other
/// state exists, so one instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct NotificationService {
    publisher: Arc<dyn NotificationPublisher>,
    topic: TopicArn,
}

impl NotificationService {
    /// Build a service publishing every message to `topic`.
    pub fn new(publisher: Arc<dyn NotificationPublisher>, topic: TopicArn) -> Self {
        Self { publisher, topic }
    }
}

#[async_trait]
impl NotificationCommand for NotificationService {
    async fn send(&self, message: Message) -> Result<SendOutcome, Error> {
        let receipt = self
            .publisher
            .publish(&self.topic, &message)
            .await
            .map_err(|err| {
                error!(topic = %self.topic, error = %err, "notification publish faulted");
                Error::internal("failed to publish notification")
                    .with_details(json!({ "reason": err.to_string() }))
            })?;

        if receipt.is_ok() {
            debug!(topic = %self.topic, "notification delivered");
            return Ok(SendOutcome::Delivered);
        }

        warn!(
            topic = %self.topic,
            status = receipt.status,
            "pub/sub service reported a non-OK status; relaying"
        );
        Ok(SendOutcome::Relayed {
            status: receipt.status,
            body: receipt.body,
        })
    }
}
