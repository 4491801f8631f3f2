//! OpenAPI documentation for the notification API.
//!
//! [`ApiDoc`] registers the send endpoint, the health probes, and the error
//! schema wrappers. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SNS notification API",
        description = "Forwards a message to the configured SNS topic and relays the outcome."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::notifications::send_notification,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "notifications", description = "Publishing messages to the topic"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
