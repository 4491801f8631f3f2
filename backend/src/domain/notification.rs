//! Notification primitives: the message being forwarded, the topic it goes
//! to, and what the caller learns about the attempt.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Opaque message body forwarded to the topic.
///
/// No structure, size, or emptiness checks are applied here; the pub/sub
/// service is the only authority on what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message(String);

impl Message {
    /// Borrow the body.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Validation errors returned when constructing [`TopicArn`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicArnValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("topic identifier must not be empty")]
    Empty,
    /// Identifier has leading or trailing whitespace.
    #[error("topic identifier must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// Destination topic identifier, fixed for the life of the process.
///
/// # Examples
/// ```
/// use sns_notifier::domain::TopicArn;
///
/// let topic = TopicArn::new("arn:aws:sns:us-east-1:123:topic").expect("valid topic");
/// assert_eq!(topic.as_str(), "arn:aws:sns:us-east-1:123:topic");
/// assert!(TopicArn::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicArn(String);

impl TopicArn {
    /// Validate and wrap a topic identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, TopicArnValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TopicArnValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(TopicArnValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of forwarding one message.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The publisher reported HTTP 200.
    Delivered,
    /// The publisher reported another status; both are passed back verbatim.
    Relayed {
        /// Upstream status code.
        status: u16,
        /// Upstream response object.
        body: Value,
    },
}
