use service_core::config::Config as CoreConfig;
use std::sync::{Arc, Once};
use topic_service::config::{AwsConfig, TopicConfig};
use topic_service::models::PayloadShape;
use topic_service::services::{init_metrics, MockPublisher, TopicPublisher};
use topic_service::startup::Application;

static INIT: Once = Once::new();

pub struct TestApp {
    pub address: String,
    pub publisher: Arc<MockPublisher>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(MockPublisher::new(true))).await
    }

    #[allow(dead_code)]
    pub async fn spawn_failing() -> Self {
        Self::spawn_with(Arc::new(MockPublisher::new(false))).await
    }

    async fn spawn_with(publisher: Arc<MockPublisher>) -> Self {
        // One recorder per test binary
        INIT.call_once(init_metrics);

        // Use random port for testing (port 0)
        let config = TopicConfig {
            common: CoreConfig { port: 0 },
            aws: AwsConfig {
                account_id: "123456789012".to_string(),
                region: "us-east-1".to_string(),
                offline: true,
                enabled: false, // Use mock
            },
            payload_shape: PayloadShape::Structured,
        };

        let app = Application::build_with_publisher(
            config,
            publisher.clone() as Arc<dyn TopicPublisher>,
        )
        .await
        .expect("Failed to build application");

        let port = app.port();
        tokio::spawn(app.run_until_stopped());

        Self {
            address: format!("http://127.0.0.1:{}", port),
            publisher,
        }
    }
}
