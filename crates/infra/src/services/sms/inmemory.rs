use super::{ISmsTransport, SmsMessage};
use std::sync::Mutex;
use tracing::info;

/// Records outbound messages instead of delivering them. Used in tests and
/// when no SMS gateway credentials are configured.
pub struct InMemorySmsTransport {
    sent: Mutex<Vec<SmsMessage>>,
    failure: Mutex<Option<String>>,
}

impl InMemorySmsTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failure: Mutex::new(None),
        }
    }

    pub fn sent(&self) -> Vec<SmsMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Every following `send` fails with the given error message until this
    /// is reset with `None`
    pub fn set_failure(&self, failure: Option<String>) {
        *self.failure.lock().unwrap() = failure;
    }
}

impl Default for InMemorySmsTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ISmsTransport for InMemorySmsTransport {
    async fn send(&self, message: &SmsMessage) -> anyhow::Result<()> {
        let failure = self.failure.lock().unwrap().clone();
        if let Some(failure) = failure {
            return Err(anyhow::Error::msg(failure));
        }
        info!("Recorded sms to {}: {}", message.to, message.body);
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_and_fails_on_demand() {
        let transport = InMemorySmsTransport::new();
        let msg = SmsMessage {
            from: "+15550000000".into(),
            to: "+15551234567".into(),
            body: "hello".into(),
        };
        assert!(transport.send(&msg).await.is_ok());
        transport.set_failure(Some("gateway down".into()));
        let err = transport.send(&msg).await.unwrap_err();
        assert_eq!(err.to_string(), "gateway down");
        transport.set_failure(None);
        assert!(transport.send(&msg).await.is_ok());
        assert_eq!(transport.sent(), vec![msg.clone(), msg]);
    }
}
