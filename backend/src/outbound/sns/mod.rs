//! AWS SNS outbound adapter.
//!
//! This module provides the SDK-backed implementation of the
//! `NotificationPublisher` port.

mod dto;
mod publisher;

pub use publisher::{SnsClientOptions, SnsNotificationPublisher};
