pub mod metrics;
pub mod publisher;

pub use metrics::{get_metrics, init_metrics, record_publish, record_receive};
pub use publisher::{
    MockPublisher, PublishError, PublishReceipt, SnsPublisher, TopicPublisher,
};
