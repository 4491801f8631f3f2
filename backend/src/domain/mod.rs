//! Domain primitives, services, and ports.
//!
//! Nothing here knows about actix or the AWS SDK. Inbound adapters call the
//! [`ports::NotificationCommand`] driving port; outbound adapters implement
//! [`ports::NotificationPublisher`].
//!
//! Public surface:
//! - `Message`, `TopicArn`, `SendOutcome`: notification primitives.
//! - `NotificationService`: the pass-through notifier.
//! - `Error`, `ErrorCode`: transport-agnostic error payload.
//! - `TraceId`, `TRACE_ID_HEADER`: request correlation.

pub mod error;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::notification::{Message, SendOutcome, TopicArn, TopicArnValidationError};
pub use self::notification_service::NotificationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
