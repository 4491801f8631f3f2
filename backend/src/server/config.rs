//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use sns_notifier::domain::ports::NotificationCommand;

/// Everything [`super::create_server`] needs to build the listener.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) notifications: Arc<dyn NotificationCommand>,
}

impl ServerConfig {
    /// Construct a server configuration around the notification port.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, notifications: Arc<dyn NotificationCommand>) -> Self {
        Self {
            bind_addr,
            notifications,
        }
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
