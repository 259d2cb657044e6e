pub mod envelope;
pub mod event;

pub use envelope::{Envelope, EnvelopeError, MessageStructure, PayloadShape, TopicArn};
pub use event::{InboundEvent, InboundRecord, SnsRecord};
