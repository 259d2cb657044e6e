use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

use crate::models::PayloadShape;

#[derive(Debug, Clone, Deserialize)]
pub struct TopicConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub aws: AwsConfig,
    #[serde(default)]
    pub payload_shape: PayloadShape,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    pub account_id: String,
    pub region: String,
    /// Redirects publishes to the local emulator instead of the
    /// production endpoint.
    pub offline: bool,
    pub enabled: bool,
}

impl TopicConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let offline = env::var("IS_OFFLINE")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Ok(TopicConfig {
            common,
            aws: AwsConfig {
                // The emulator account id is fixed; the real one must be
                // provided by the deployment environment.
                account_id: get_env("AWS_ACCOUNT_ID", offline.then_some("123456789012"))?,
                region: get_env("AWS_REGION", Some("us-east-1"))?,
                offline,
                enabled: env::var("SNS_ENABLED")
                    .map(|v| is_truthy(&v))
                    .unwrap_or(true),
            },
            payload_shape: match env::var("PAYLOAD_SHAPE") {
                Ok(v) => v
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                Err(_) => PayloadShape::default(),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => default.map(str::to_string).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
        }),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values_enable_offline_mode() {
        assert!(is_truthy("true"));
        assert!(is_truthy("1"));
        assert!(is_truthy(" YES "));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("offline"));
    }

    #[test]
    fn get_env_falls_back_to_default() {
        let value = get_env("TOPIC_SERVICE_UNSET_VAR", Some("fallback")).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let err = get_env("TOPIC_SERVICE_UNSET_VAR", None).unwrap_err();
        assert!(err.to_string().contains("TOPIC_SERVICE_UNSET_VAR"));
    }
}
