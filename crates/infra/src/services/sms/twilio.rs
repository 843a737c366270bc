use super::{ISmsTransport, SmsMessage};
use crate::config::TwilioCredentials;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

pub struct TwilioSmsTransport {
    client: Client,
    credentials: TwilioCredentials,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

impl TwilioSmsTransport {
    pub fn new(credentials: TwilioCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.credentials.account_sid
        )
    }
}

#[async_trait::async_trait]
impl ISmsTransport for TwilioSmsTransport {
    async fn send(&self, message: &SmsMessage) -> anyhow::Result<()> {
        let params = [
            ("From", message.from.as_str()),
            ("To", message.to.as_str()),
            ("Body", message.body.as_str()),
        ];
        let res = self
            .client
            .post(&self.messages_url())
            .basic_auth(
                &self.credentials.account_sid,
                Some(&self.credentials.auth_token),
            )
            .form(&params)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }

        let status = res.status();
        match res.json::<TwilioErrorResponse>().await {
            Ok(e) => Err(anyhow::Error::msg(match e.code {
                Some(code) => format!("{} (code {})", e.message, code),
                None => e.message,
            })),
            Err(e) => {
                error!("Unable to parse twilio error response: {:?}", e);
                Err(anyhow::Error::msg(format!(
                    "Twilio responded with status: {}",
                    status
                )))
            }
        }
    }
}
