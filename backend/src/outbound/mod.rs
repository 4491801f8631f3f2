//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **sns**: AWS SNS implementation of the `NotificationPublisher` port.
//!
//! Adapters are thin translators between SDK types and domain types. They
//! contain no business logic.

pub mod sns;
