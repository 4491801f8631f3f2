//! Notification API handlers.
//!
//! ```text
//! POST /Notification/send  Forward a message to the configured topic
//! ```
//!
//! The lowercase path is accepted too. The body is the message: a JSON string
//! literal when the request is sent as JSON, the raw UTF-8 text otherwise.

use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, mime, web};
use serde_json::json;

use crate::domain::{Error, Message, SendOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Canonical path of the send endpoint.
pub const SEND_PATH: &str = "/Notification/send";
/// Lowercase alias of [`SEND_PATH`].
pub const SEND_PATH_LOWERCASE: &str = "/notification/send";

/// Upper bound on buffered request bodies.
///
/// Sits well above the SNS message limit so oversized messages are judged by
/// SNS, not by the extractor.
pub const MAX_BODY_BYTES: usize = 30_000_000;

/// Register the notification routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource([SEND_PATH, SEND_PATH_LOWERCASE])
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .route(web::post().to(send_notification)),
    );
}

fn is_json(mime: &mime::Mime) -> bool {
    mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}

/// Bind the request body to a [`Message`].
///
/// JSON requests must carry a JSON string; everything else is taken as raw
/// text and must be valid UTF-8.
fn decode_message(request: &HttpRequest, body: &[u8]) -> Result<Message, Error> {
    let content_type = request.mime_type().map_err(|err| {
        Error::invalid_request("Content-Type header is malformed")
            .with_details(json!({ "reason": err.to_string() }))
    })?;

    match content_type {
        Some(ref mime) if is_json(mime) => serde_json::from_slice::<String>(body)
            .map(Message::from)
            .map_err(|err| {
                Error::invalid_request("request body must be a JSON string")
                    .with_details(json!({ "reason": err.to_string() }))
            }),
        _ => String::from_utf8(body.to_vec())
            .map(Message::from)
            .map_err(|_| Error::invalid_request("request body must be valid UTF-8")),
    }
}

/// Rebuild the upstream answer; informational and out-of-range codes cannot
/// be a final response.
fn relay(status: u16, body: &serde_json::Value) -> ApiResult<HttpResponse> {
    let invalid = || {
        Error::internal("upstream reported an invalid status code")
            .with_details(json!({ "status": status }))
    };
    let status = StatusCode::from_u16(status).map_err(|_| invalid())?;
    if status.is_informational() {
        return Err(invalid());
    }
    Ok(HttpResponse::build(status).json(body))
}

/// Forward a message to the configured topic.
///
/// Returns `200 OK` with an empty body when the pub/sub service accepts the
/// message. Any other upstream status is returned as-is with the upstream
/// response object as the JSON body.
///
/// # Errors
///
/// - `400 Bad Request`: the body cannot be bound to a message.
/// - `500 Internal Server Error`: the publisher faulted (network, auth,
///   throttling, timeout); nothing is retried.
#[utoipa::path(
    post,
    path = "/Notification/send",
    request_body(
        content = String,
        description = "Message to publish; a JSON string or raw text",
        content_type = "text/plain"
    ),
    responses(
        (status = 200, description = "Message accepted by the topic"),
        (status = 400, description = "Body is not a valid message", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Publisher fault", body = crate::inbound::http::schemas::ErrorSchema),
        (status = "default", description = "Upstream status and response object relayed verbatim", body = Object)
    ),
    tags = ["notifications"],
    operation_id = "sendNotification"
)]
pub async fn send_notification(
    state: web::Data<HttpState>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let message = decode_message(&request, &body)?;

    match state.notifications.send(message).await? {
        SendOutcome::Delivered => Ok(HttpResponse::Ok().finish()),
        SendOutcome::Relayed { status, body } => relay(status, &body),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockNotificationCommand;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    fn expect_message(
        command: &mut MockNotificationCommand,
        expected: &'static str,
        outcome: Result<SendOutcome, Error>,
    ) {
        command
            .expect_send()
            .withf(move |message| message.as_str() == expected)
            .times(1)
            .return_once(move |_| outcome);
    }

    async fn post(
        command: MockNotificationCommand,
        request: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let state = HttpState::new(Arc::new(command));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;
        test::call_service(&app, request.to_request()).await
    }

    #[rstest]
    #[case(SEND_PATH, "application/json", "\"hello\"", "hello")]
    #[case(SEND_PATH, "application/json; charset=utf-8", "\"\"", "")]
    #[case(SEND_PATH, "text/plain", "hello", "hello")]
    #[case(SEND_PATH, "text/plain", "", "")]
    #[case(SEND_PATH_LOWERCASE, "application/json", "\"hello\"", "hello")]
    #[actix_web::test]
    async fn delivered_messages_return_empty_ok(
        #[case] path: &str,
        #[case] content_type: &str,
        #[case] payload: &'static str,
        #[case] expected: &'static str,
    ) {
        let mut command = MockNotificationCommand::new();
        expect_message(&mut command, expected, Ok(SendOutcome::Delivered));

        let res = post(
            command,
            test::TestRequest::post()
                .uri(path)
                .insert_header((CONTENT_TYPE, content_type))
                .set_payload(payload),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(test::read_body(res).await.is_empty());
    }

    #[actix_web::test]
    async fn body_without_content_type_is_raw_text() {
        let mut command = MockNotificationCommand::new();
        expect_message(&mut command, "{\"not\":\"parsed\"}", Ok(SendOutcome::Delivered));

        let res = post(
            command,
            test::TestRequest::post()
                .uri(SEND_PATH)
                .set_payload("{\"not\":\"parsed\"}"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(403, serde_json::json!({ "Error": "Forbidden" }))]
    #[case(429, serde_json::json!({ "Error": "Throttled" }))]
    #[case(202, serde_json::json!({ "MessageId": "m-1" }))]
    #[actix_web::test]
    async fn relayed_outcomes_keep_status_and_body(#[case] status: u16, #[case] body: Value) {
        let mut command = MockNotificationCommand::new();
        expect_message(
            &mut command,
            "x",
            Ok(SendOutcome::Relayed {
                status,
                body: body.clone(),
            }),
        );

        let res = post(
            command,
            test::TestRequest::post()
                .uri(SEND_PATH)
                .insert_header((CONTENT_TYPE, "application/json"))
                .set_payload("\"x\""),
        )
        .await;

        assert_eq!(res.status().as_u16(), status);
        let payload: Value = test::read_body_json(res).await;
        assert_eq!(payload, body);
    }

    #[rstest]
    #[case(1000)]
    #[case(99)]
    #[case(100)]
    #[case(199)]
    #[actix_web::test]
    async fn invalid_upstream_status_is_internal_error(#[case] status: u16) {
        let mut command = MockNotificationCommand::new();
        expect_message(
            &mut command,
            "x",
            Ok(SendOutcome::Relayed {
                status,
                body: Value::Null,
            }),
        );

        let res = post(
            command,
            test::TestRequest::post().uri(SEND_PATH).set_payload("x"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn publisher_faults_surface_as_redacted_500() {
        let mut command = MockNotificationCommand::new();
        expect_message(
            &mut command,
            "hello",
            Err(Error::internal("failed to publish notification")
                .with_details(serde_json::json!({ "reason": "timeout" }))),
        );

        let res = post(
            command,
            test::TestRequest::post().uri(SEND_PATH).set_payload("hello"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload: Value = test::read_body_json(res).await;
        assert_eq!(payload["code"], "internal_error");
        assert_eq!(payload["message"], "Internal server error");
        assert!(payload.get("details").is_none());
    }

    #[rstest]
    #[case(
        "application/json",
        serde_json::to_string(&"\"".repeat(140_000)).expect("encode"),
        "\"".repeat(140_000)
    )]
    #[case("text/plain", "a".repeat(300_000), "a".repeat(300_000))]
    #[actix_web::test]
    async fn bodies_above_the_default_extractor_limit_are_published(
        #[case] content_type: &str,
        #[case] payload: String,
        #[case] expected: String,
    ) {
        let mut command = MockNotificationCommand::new();
        command
            .expect_send()
            .withf(move |message| message.as_str() == expected)
            .times(1)
            .return_once(|_| Ok(SendOutcome::Delivered));

        let res = post(
            command,
            test::TestRequest::post()
                .uri(SEND_PATH)
                .insert_header((CONTENT_TYPE, content_type))
                .set_payload(payload),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case("application/json", b"hello".as_slice())]
    #[case("application/json", b"{\"message\":\"hello\"}".as_slice())]
    #[case("text/plain", b"\xff\xfe".as_slice())]
    #[actix_web::test]
    async fn unbindable_bodies_are_rejected_before_publishing(
        #[case] content_type: &str,
        #[case] payload: &'static [u8],
    ) {
        let command = MockNotificationCommand::new();

        let res = post(
            command,
            test::TestRequest::post()
                .uri(SEND_PATH)
                .insert_header((CONTENT_TYPE, content_type))
                .set_payload(payload),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: Value = test::read_body_json(res).await;
        assert_eq!(payload["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn get_is_not_routed_to_send() {
        let command = MockNotificationCommand::new();

        let res = post(command, test::TestRequest::get().uri(SEND_PATH)).await;

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
