use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed name of the destination topic. The ARN is derived per request
/// from the configured region and account id.
pub const TOPIC_NAME: &str = "sns-example-topic";

/// Body of the static test message every publish carries.
pub const DEFAULT_MESSAGE: &str = "Ultra Test Message";

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("topic ARN {0} segment must not be empty")]
    EmptyArnSegment(&'static str),

    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fully-qualified resource name of the destination topic:
/// `arn:aws:sns:<region>:<account_id>:sns-example-topic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicArn(String);

impl TopicArn {
    pub fn new(region: &str, account_id: &str) -> Result<Self, EnvelopeError> {
        if region.trim().is_empty() {
            return Err(EnvelopeError::EmptyArnSegment("region"));
        }
        if account_id.trim().is_empty() {
            return Err(EnvelopeError::EmptyArnSegment("account id"));
        }
        Ok(Self(format!("arn:aws:sns:{}:{}:{}", region, account_id, TOPIC_NAME)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared structure of the envelope body on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStructure {
    /// Per-protocol fan-out body with a `default` field; the service
    /// parses the body as JSON.
    Json,
    /// Opaque string body delivered as-is.
    Plain,
}

/// Shape of the published payload.
///
/// The two deployed handler variants never agreed on one shape, so it is
/// an explicit configuration choice rather than a hardcoded constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// `{"default": "<json-encoded body>"}` with JSON message structure.
    #[default]
    Structured,
    /// The JSON-encoded body assigned directly as a plain string message.
    Nested,
}

impl FromStr for PayloadShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(PayloadShape::Structured),
            "nested" => Ok(PayloadShape::Nested),
            other => Err(format!("unknown payload shape: {}", other)),
        }
    }
}

/// The structured message submitted to the pub/sub service.
///
/// Constructed fresh per request; never persisted.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub topic_arn: TopicArn,
    pub structure: MessageStructure,
    pub message: String,
}

impl Envelope {
    /// Build the test-message envelope for the given shape and topic.
    pub fn build(shape: PayloadShape, topic_arn: TopicArn) -> Result<Self, EnvelopeError> {
        let body = serde_json::to_string(&json!({ "message": DEFAULT_MESSAGE }))?;

        let (structure, message) = match shape {
            PayloadShape::Structured => (
                MessageStructure::Json,
                serde_json::to_string(&json!({ "default": body }))?,
            ),
            PayloadShape::Nested => (MessageStructure::Plain, body),
        };

        Ok(Self {
            topic_arn,
            structure,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_arn_renders_fully_qualified_name() {
        let arn = TopicArn::new("us-east-1", "123456789012").unwrap();
        assert_eq!(
            arn.as_str(),
            "arn:aws:sns:us-east-1:123456789012:sns-example-topic"
        );
    }

    #[test]
    fn topic_arn_tail_has_three_segments() {
        let arn = TopicArn::new("eu-west-2", "098765432109").unwrap();
        let tail = arn.as_str().strip_prefix("arn:aws:sns:").unwrap();
        let segments: Vec<&str> = tail.split(':').collect();
        assert_eq!(segments, vec!["eu-west-2", "098765432109", "sns-example-topic"]);
        assert!(segments.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn topic_arn_rejects_empty_region() {
        let err = TopicArn::new("", "123456789012").unwrap_err();
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn topic_arn_rejects_empty_account() {
        let err = TopicArn::new("us-east-1", "  ").unwrap_err();
        assert!(err.to_string().contains("account id"));
    }

    #[test]
    fn structured_shape_wraps_body_in_default_field() {
        let arn = TopicArn::new("us-east-1", "123456789012").unwrap();
        let envelope = Envelope::build(PayloadShape::Structured, arn).unwrap();

        assert_eq!(envelope.structure, MessageStructure::Json);
        let outer: serde_json::Value = serde_json::from_str(&envelope.message).unwrap();
        let inner: serde_json::Value =
            serde_json::from_str(outer["default"].as_str().unwrap()).unwrap();
        assert_eq!(inner["message"], DEFAULT_MESSAGE);
    }

    #[test]
    fn nested_shape_sends_body_as_plain_string() {
        let arn = TopicArn::new("us-east-1", "123456789012").unwrap();
        let envelope = Envelope::build(PayloadShape::Nested, arn).unwrap();

        assert_eq!(envelope.structure, MessageStructure::Plain);
        let body: serde_json::Value = serde_json::from_str(&envelope.message).unwrap();
        assert_eq!(body["message"], DEFAULT_MESSAGE);
    }

    #[test]
    fn payload_shape_parses_from_config_value() {
        assert_eq!("structured".parse::<PayloadShape>().unwrap(), PayloadShape::Structured);
        assert_eq!(" Nested ".parse::<PayloadShape>().unwrap(), PayloadShape::Nested);
        assert!("flat".parse::<PayloadShape>().is_err());
    }
}
