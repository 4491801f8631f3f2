//! Startup configuration loaded via OrthoConfig.
//!
//! Values come from the environment (or an OrthoConfig config file) once, in
//! `main`, and are validated into domain types before anything is built:
//!
//! | Env var              | Meaning                                  |
//! |----------------------|------------------------------------------|
//! | `AWS_TOPIC_ARN`      | destination topic (required)             |
//! | `AWS_REGION`         | region override                          |
//! | `AWS_ENDPOINT_URL`   | alternative SNS endpoint                 |
//! | `NOTIFIER_BIND_ADDR` | HTTP listener, default `0.0.0.0:8080`    |

use std::ffi::OsString;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{TopicArn, TopicArnValidationError};
use crate::outbound::sns::SnsClientOptions;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const PROGRAM_NAME: &str = "sns-notifier";

/// AWS-facing settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AWS")]
pub struct AwsSettings {
    /// Destination SNS topic ARN.
    pub topic_arn: Option<String>,
    /// Region override for the SNS client.
    pub region: Option<String>,
    /// Alternative SNS endpoint, e.g. LocalStack.
    pub endpoint_url: Option<String>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTIFIER")]
pub struct ServerSettings {
    /// Socket address to bind.
    pub bind_addr: Option<String>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR)
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// OrthoConfig could not read or merge its sources.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    /// No topic was configured.
    #[error("AWS_TOPIC_ARN must be set")]
    MissingTopic,
    /// The configured topic is not usable.
    #[error("invalid AWS_TOPIC_ARN: {0}")]
    InvalidTopic(#[from] TopicArnValidationError),
    /// The bind address does not parse as `host:port`.
    #[error("invalid NOTIFIER_BIND_ADDR {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Validated startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Topic every message is published to.
    pub topic: TopicArn,
    /// SNS client overrides.
    pub sns: SnsClientOptions,
    /// HTTP listener address.
    pub bind_addr: SocketAddr,
}

impl NotifierConfig {
    /// Load every settings group and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a source cannot be read or a value is
    /// missing or malformed.
    pub fn load() -> Result<Self, SettingsError> {
        let program = [OsString::from(PROGRAM_NAME)];
        let aws = AwsSettings::load_from_iter(program.clone()).map_err(|err| {
            SettingsError::Load {
                message: err.to_string(),
            }
        })?;
        let server =
            ServerSettings::load_from_iter(program).map_err(|err| SettingsError::Load {
                message: err.to_string(),
            })?;
        Self::from_settings(aws, &server)
    }

    /// Validate already loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for a missing or invalid topic or bind
    /// address.
    pub fn from_settings(aws: AwsSettings, server: &ServerSettings) -> Result<Self, SettingsError> {
        let AwsSettings {
            topic_arn,
            region,
            endpoint_url,
        } = aws;

        let topic = TopicArn::new(topic_arn.ok_or(SettingsError::MissingTopic)?)?;
        let raw_addr = server.bind_addr();
        let bind_addr = raw_addr
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw_addr.to_owned(),
                message: err.to_string(),
            })?;

        Ok(Self {
            topic,
            sns: SnsClientOptions {
                region: non_blank(region),
                endpoint_url: non_blank(endpoint_url),
            },
            bind_addr,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
