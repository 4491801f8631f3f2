//! SDK-backed SNS publisher.
//!
//! The adapter owns transport details only: building the publish call,
//! mapping SDK failures onto [`NotificationPublishError`], and serialising the
//! SNS response object for the receipt.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sns::Client;
use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sns::operation::publish::PublishOutput;
use tracing::{debug, warn};

use super::dto::PublishResponseDto;
use crate::domain::ports::{NotificationPublishError, NotificationPublisher, PublishReceipt};
use crate::domain::{Message, TopicArn, TraceId};

const UNKNOWN_ERROR_CODE: &str = "Unknown";
const MISSING_ERROR_MESSAGE: &str = "no error message returned";

/// Overrides applied on top of the AWS default configuration chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnsClientOptions {
    /// Region override; the default provider chain is used when absent.
    pub region: Option<String>,
    /// Alternative endpoint, e.g. a LocalStack URL.
    pub endpoint_url: Option<String>,
}

/// Publishes notifications through the AWS SNS `Publish` API.
#[derive(Debug, Clone)]
pub struct SnsNotificationPublisher {
    client: Client,
}

impl SnsNotificationPublisher {
    /// Wrap an already configured SNS client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the AWS default configuration chain plus `options`.
    ///
    /// Credentials are resolved lazily, so this never fails; bad credentials
    /// surface on the first publish.
    pub async fn from_env(options: SnsClientOptions) -> Self {
        let SnsClientOptions {
            region,
            endpoint_url,
        } = options;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(endpoint_url) = endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let config = loader.load().await;

        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl NotificationPublisher for SnsNotificationPublisher {
    async fn publish(
        &self,
        topic: &TopicArn,
        message: &Message,
    ) -> Result<PublishReceipt, NotificationPublishError> {
        let trace_id = TraceId::current().map(|id| id.to_string());
        let output = self
            .client
            .publish()
            .topic_arn(topic.as_str())
            .message(message.as_str())
            .send()
            .await
            .map_err(|err| {
                let mapped = map_sdk_error(&err);
                warn!(topic = %topic, trace_id = ?trace_id, error = %mapped, "sns publish failed");
                mapped
            })?;

        debug!(
            topic = %topic,
            trace_id = ?trace_id,
            message_id = output.message_id().unwrap_or_default(),
            "sns publish accepted"
        );
        receipt_from_output(&output)
    }
}

fn receipt_from_output(output: &PublishOutput) -> Result<PublishReceipt, NotificationPublishError> {
    let body = serde_json::to_value(PublishResponseDto::from(output)).map_err(|err| {
        NotificationPublishError::request(format!("failed to encode publish response: {err}"))
    })?;
    Ok(PublishReceipt::ok(body))
}

/// Classify an SDK failure.
///
/// The SDK raises on every non-2xx answer, so service errors arrive here as
/// faults rather than as receipts.
fn map_sdk_error<E, R>(err: &SdkError<E, R>) -> NotificationPublishError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let Some(service) = err.as_service_error() {
        return NotificationPublishError::service(
            service.code().unwrap_or(UNKNOWN_ERROR_CODE),
            service.message().unwrap_or(MISSING_ERROR_MESSAGE),
        );
    }

    let detail = DisplayErrorContext(err).to_string();
    match err {
        SdkError::TimeoutError(_) => NotificationPublishError::timeout(detail),
        SdkError::DispatchFailure(_) => NotificationPublishError::transport(detail),
        _ => NotificationPublishError::request(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sns::config::Credentials;
    use aws_sdk_sns::error::ErrorMetadata;
    use aws_sdk_sns::operation::publish::PublishError;
    use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_types::body::SdkBody;
    use rstest::rstest;
    use serde_json::json;

    const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:alerts";
    const ENCODED_TOPIC: &str = "arn%3Aaws%3Asns%3Aus-east-1%3A123456789012%3Aalerts";

    const PUBLISH_OK_XML: &str = r#"<PublishResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <PublishResult>
    <MessageId>94f20ce6-13c5-43a0-9a9e-ca52d816e90b</MessageId>
  </PublishResult>
  <ResponseMetadata>
    <RequestId>f187a3c1-376f-11df-8963-01868b7c937a</RequestId>
  </ResponseMetadata>
</PublishResponse>"#;

    const AUTHORIZATION_ERROR_XML: &str = r#"<ErrorResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <Error>
    <Type>Sender</Type>
    <Code>AuthorizationError</Code>
    <Message>User is not authorized to perform SNS:Publish</Message>
  </Error>
  <RequestId>a7a8c3c2-0c8e-5d5b-9a36-52e1a3b2a0c1</RequestId>
</ErrorResponse>"#;

    fn replay(status: u16, xml: &'static str) -> StaticReplayClient {
        StaticReplayClient::new(vec![ReplayEvent::new(
            http::Request::builder()
                .uri("https://sns.us-east-1.amazonaws.com/")
                .body(SdkBody::empty())
                .expect("request"),
            http::Response::builder()
                .status(status)
                .header("content-type", "text/xml")
                .body(SdkBody::from(xml))
                .expect("response"),
        )])
    }

    fn publisher_over(http_client: &StaticReplayClient) -> SnsNotificationPublisher {
        let config = aws_sdk_sns::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .http_client(http_client.clone())
            .build();
        SnsNotificationPublisher::new(Client::from_conf(config))
    }

    fn sent_body(http_client: &StaticReplayClient) -> String {
        let requests: Vec<_> = http_client.actual_requests().collect();
        assert_eq!(requests.len(), 1, "exactly one publish call");
        let request = requests.first().expect("one request");
        assert!(request.uri().starts_with("https://sns.us-east-1.amazonaws.com"));
        let bytes = request.body().bytes().expect("buffered body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn publish_sends_topic_and_message_and_returns_ok_receipt() {
        let http_client = replay(200, PUBLISH_OK_XML);
        let publisher = publisher_over(&http_client);
        let topic = TopicArn::new(TOPIC).expect("topic");

        let receipt = publisher
            .publish(&topic, &Message::from("hello"))
            .await
            .expect("publish succeeds");

        assert!(receipt.is_ok());
        assert_eq!(
            receipt.body,
            json!({ "MessageId": "94f20ce6-13c5-43a0-9a9e-ca52d816e90b" })
        );
        let body = sent_body(&http_client);
        assert!(body.contains("Action=Publish"), "body: {body}");
        assert!(body.contains(&format!("TopicArn={ENCODED_TOPIC}")), "body: {body}");
        assert!(body.contains("Message=hello"), "body: {body}");
    }

    #[tokio::test]
    async fn rejected_publish_maps_to_service_error() {
        let http_client = replay(403, AUTHORIZATION_ERROR_XML);
        let publisher = publisher_over(&http_client);
        let topic = TopicArn::new(TOPIC).expect("topic");

        let err = publisher
            .publish(&topic, &Message::from("x"))
            .await
            .expect_err("publish is rejected");

        assert_eq!(
            err,
            NotificationPublishError::service(
                "AuthorizationError",
                "User is not authorized to perform SNS:Publish"
            )
        );
        let body = sent_body(&http_client);
        assert!(body.contains("Message=x"), "body: {body}");
    }

    type PublishSdkError = SdkError<PublishError, ()>;

    fn service_error(code: Option<&str>, message: Option<&str>) -> PublishSdkError {
        let mut meta = ErrorMetadata::builder();
        if let Some(code) = code {
            meta = meta.code(code);
        }
        if let Some(message) = message {
            meta = meta.message(message);
        }
        SdkError::service_error(PublishError::generic(meta.build()), ())
    }

    #[rstest]
    #[case(
        service_error(Some("Throttling"), Some("Rate exceeded")),
        NotificationPublishError::service("Throttling", "Rate exceeded")
    )]
    #[case(
        service_error(Some("NotFound"), None),
        NotificationPublishError::service("NotFound", MISSING_ERROR_MESSAGE)
    )]
    #[case(
        service_error(None, None),
        NotificationPublishError::service(UNKNOWN_ERROR_CODE, MISSING_ERROR_MESSAGE)
    )]
    fn service_errors_keep_code_and_message(
        #[case] err: PublishSdkError,
        #[case] expected: NotificationPublishError,
    ) {
        assert_eq!(map_sdk_error(&err), expected);
    }

    #[test]
    fn timeouts_map_to_timeout() {
        let err: PublishSdkError = SdkError::timeout_error("operation deadline elapsed");
        assert!(matches!(
            map_sdk_error(&err),
            NotificationPublishError::Timeout { message } if message.contains("deadline")
        ));
    }

    #[test]
    fn construction_failures_map_to_request() {
        let err: PublishSdkError = SdkError::construction_failure("missing topic");
        assert!(matches!(
            map_sdk_error(&err),
            NotificationPublishError::Request { .. }
        ));
    }

    #[test]
    fn receipt_carries_message_and_sequence_ids() {
        let output = PublishOutput::builder()
            .message_id("5a7d-11")
            .sequence_number("10000000000000003000")
            .build();

        let receipt = receipt_from_output(&output).expect("receipt");

        assert!(receipt.is_ok());
        assert_eq!(
            receipt.body,
            json!({ "MessageId": "5a7d-11", "SequenceNumber": "10000000000000003000" })
        );
    }

    #[test]
    fn receipt_omits_absent_fields() {
        let output = PublishOutput::builder().message_id("m-1").build();
        let receipt = receipt_from_output(&output).expect("receipt");
        assert_eq!(receipt.body, json!({ "MessageId": "m-1" }));
    }
}
