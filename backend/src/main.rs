//! Service entry-point: loads settings, builds the SNS publisher, and serves
//! the notification endpoint.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, drain_on};
use sns_notifier::domain::NotificationService;
use sns_notifier::inbound::http::health::HealthState;
use sns_notifier::outbound::sns::SnsNotificationPublisher;
use sns_notifier::settings::NotifierConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let NotifierConfig {
        topic,
        sns,
        bind_addr,
    } = NotifierConfig::load().map_err(std::io::Error::other)?;

    let publisher = SnsNotificationPublisher::from_env(sns).await;
    info!(topic = %topic, %bind_addr, "starting notification relay");
    let notifications = Arc::new(NotificationService::new(Arc::new(publisher), topic));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, notifications);
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
