use serde::Deserialize;

/// Inbound topic delivery event as posted by the notification service.
///
/// Externally defined; only the presence of the first record is checked.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<InboundRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Message")]
    pub message: String,
}

impl InboundEvent {
    /// Message body of the first record, if any. Later records are
    /// ignored on purpose.
    pub fn first_message(&self) -> Option<&str> {
        self.records.first().map(|r| r.sns.message.as_str())
    }
}
