mod inmemory;
mod twilio;

pub use inmemory::InMemorySmsTransport;
pub use twilio::TwilioSmsTransport;

/// An outbound SMS ready to be handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct SmsMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// External gateway that delivers SMS messages
#[async_trait::async_trait]
pub trait ISmsTransport: Send + Sync {
    async fn send(&self, message: &SmsMessage) -> anyhow::Result<()>;
}
