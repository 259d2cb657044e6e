pub mod health;
pub mod receive;
pub mod send;

pub use health::{health_check, readiness_check};
pub use receive::receive_message;
pub use send::send_message;
