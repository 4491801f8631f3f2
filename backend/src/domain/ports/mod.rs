//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports are called by inbound adapters; driven ports are implemented
//! by outbound adapters. Port errors are typed so adapters map their failures
//! into predictable variants.

mod macros;
mod notification_command;
mod notification_publisher;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use notification_command::MockNotificationCommand;
pub use notification_command::{FixtureNotificationCommand, NotificationCommand};
#[cfg(test)]
pub use notification_publisher::MockNotificationPublisher;
pub use notification_publisher::{
    NotificationPublishError, NotificationPublisher, PUBLISH_OK_STATUS, PublishReceipt,
};
