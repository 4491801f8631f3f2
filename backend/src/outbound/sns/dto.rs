//! JSON shape of the SNS publish response relayed to callers.

use aws_sdk_sns::operation::publish::PublishOutput;
use serde::Serialize;

/// Publish response object, keyed the way SNS names the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct PublishResponseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) sequence_number: Option<String>,
}

impl From<&PublishOutput> for PublishResponseDto {
    fn from(output: &PublishOutput) -> Self {
        Self {
            message_id: output.message_id().map(str::to_owned),
            sequence_number: output.sequence_number().map(str::to_owned),
        }
    }
}
