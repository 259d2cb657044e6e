use crate::config::AwsConfig;
use crate::models::{Envelope, MessageStructure};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_sns::config::{Builder as SnsConfigBuilder, Credentials, Region};
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client as SnsClient;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Local SNS emulator address used in offline mode.
pub const LOCAL_SNS_ENDPOINT: &str = "http://127.0.0.1:4002";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Publisher not enabled: {0}")]
    NotEnabled(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Publish rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub message_id: Option<String>,
}

/// The notify side of the dispatcher. Injected into handlers so the
/// service is testable without a network client.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(&self, envelope: &Envelope) -> Result<PublishReceipt, PublishError>;
    fn is_enabled(&self) -> bool;
}

/// Endpoint override for the SNS client. Online mode uses the default
/// production resolution, no override.
pub fn endpoint_override(offline: bool) -> Option<&'static str> {
    offline.then_some(LOCAL_SNS_ENDPOINT)
}

#[derive(Debug)]
pub struct SnsPublisher {
    client: SnsClient,
    endpoint: Option<&'static str>,
    enabled: bool,
}

impl SnsPublisher {
    /// Build the SNS client for the given deployment mode.
    pub async fn from_config(cfg: &AwsConfig) -> Result<Self, PublishError> {
        if cfg.region.trim().is_empty() {
            return Err(PublishError::Configuration(
                "AWS region is not configured".to_string(),
            ));
        }

        let region = Region::new(cfg.region.clone());
        let region_provider = RegionProviderChain::first_try(region.clone());
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

        // The emulator accepts any static credentials; production relies
        // on the default provider chain.
        if cfg.offline {
            let credentials =
                Credentials::new("offline", "offline", None, None, "static-credentials");
            loader = loader.credentials_provider(credentials);
        }
        let aws_cfg = loader.load().await;

        let endpoint = endpoint_override(cfg.offline);
        let mut builder = SnsConfigBuilder::from(&aws_cfg).region(region);
        if let Some(ep) = endpoint {
            builder = builder.endpoint_url(ep);
        }

        Ok(Self {
            client: SnsClient::from_conf(builder.build()),
            endpoint,
            enabled: cfg.enabled,
        })
    }

    /// Endpoint override in effect, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
    }
}

#[async_trait]
impl TopicPublisher for SnsPublisher {
    async fn publish(&self, envelope: &Envelope) -> Result<PublishReceipt, PublishError> {
        if !self.enabled {
            return Err(PublishError::NotEnabled(
                "SNS publisher is not enabled".to_string(),
            ));
        }

        let mut request = self
            .client
            .publish()
            .topic_arn(envelope.topic_arn.as_str())
            .message(&envelope.message);

        if envelope.structure == MessageStructure::Json {
            request = request.message_structure("json");
        }

        let output = request
            .send()
            .await
            .map_err(|e| PublishError::Rejected(format!("{}", DisplayErrorContext(&e))))?;

        tracing::info!(
            topic = %envelope.topic_arn,
            message_id = ?output.message_id(),
            "message published to SNS"
        );

        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Mock publisher for testing
pub struct MockPublisher {
    succeed: bool,
    publish_count: AtomicU64,
}

impl MockPublisher {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            publish_count: AtomicU64::new(0),
        }
    }

    pub fn publish_count(&self) -> u64 {
        self.publish_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TopicPublisher for MockPublisher {
    async fn publish(&self, envelope: &Envelope) -> Result<PublishReceipt, PublishError> {
        self.publish_count.fetch_add(1, Ordering::SeqCst);

        if !self.succeed {
            return Err(PublishError::Rejected(
                "simulated publish failure".to_string(),
            ));
        }

        tracing::info!(
            topic = %envelope.topic_arn,
            "[MOCK] message would be published"
        );

        Ok(PublishReceipt {
            message_id: Some(format!(
                "mock-publish-{}",
                self.publish_count.load(Ordering::SeqCst)
            )),
        })
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
