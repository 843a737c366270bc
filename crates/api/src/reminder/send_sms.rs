use crate::shared::usecase::UseCase;
use guardian_reminders_domain::{SmsLog, ID};
use guardian_reminders_infra::{sms::SmsMessage, GuardianContext};
use std::convert::Infallible;
use tracing::{error, info};

/// Delivers one message to a `User` through the SMS transport and records
/// the attempt in the `SmsLog`. Delivery failures are reported in the
/// response, never as an error.
#[derive(Debug)]
pub struct SendSmsUseCase {
    pub user_id: ID,
    /// Cellphone of the recipient without country code
    pub cellphone: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub struct SmsResult {
    pub success: bool,
    pub error_message: Option<String>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendSmsUseCase {
    type Response = SmsResult;

    type Error = Infallible;

    const NAME: &'static str = "SendSms";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let config = &ctx.config.sms;
        let sms = SmsMessage {
            from: config.from_number.clone(),
            to: format!("+{}{}", config.country_code, self.cellphone),
            body: format!("{}{}", config.message_prefix, self.message),
        };

        let result = match ctx.sms.send(&sms).await {
            Ok(_) => {
                info!("Sent sms to user: {}", self.user_id);
                SmsResult {
                    success: true,
                    error_message: None,
                }
            }
            Err(e) => {
                error!("Unable to send sms to user: {}. Err: {:?}", self.user_id, e);
                SmsResult {
                    success: false,
                    error_message: Some(e.to_string()),
                }
            }
        };

        let log = SmsLog {
            id: Default::default(),
            user_id: self.user_id.clone(),
            is_success: result.success,
            from_number: sms.from,
            to_number: sms.to,
            message: sms.body,
            error_message: result.error_message.clone(),
            created: ctx.sys.get_timestamp_millis(),
        };
        if let Err(e) = ctx.repos.sms_logs.insert(&log).await {
            error!("Unable to store sms log: {:?}. Err: {:?}", log, e);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use guardian_reminders_infra::sms::InMemorySmsTransport;
    use std::sync::Arc;

    fn setup() -> (GuardianContext, Arc<InMemorySmsTransport>) {
        let mut ctx = GuardianContext::create_inmemory();
        let transport = Arc::new(InMemorySmsTransport::new());
        ctx.sms = transport.clone();
        ctx.config.sms.from_number = "+15550000000".into();
        ctx.config.sms.country_code = "1".into();
        ctx.config.sms.message_prefix = "[staging]".into();
        (ctx, transport)
    }

    fn send_sms(user_id: &ID) -> SendSmsUseCase {
        SendSmsUseCase {
            user_id: user_id.clone(),
            cellphone: "5551234567".into(),
            message: " Guardian Reminder: Court hearing".into(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn sends_and_logs_sms() {
        let (ctx, transport) = setup();
        let user_id = ID::default();

        let res = execute(send_sms(&user_id), &ctx).await.unwrap();
        assert!(res.success);

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "+15551234567");
        assert_eq!(sent[0].from, "+15550000000");
        assert_eq!(sent[0].body, "[staging] Guardian Reminder: Court hearing");

        let logs = ctx.repos.sms_logs.find_by_user(&user_id).await;
        assert_eq!(logs.len(), 1);
        assert!(logs[0].is_success);
        assert_eq!(logs[0].to_number, "+15551234567");
        assert_eq!(logs[0].error_message, None);
    }

    #[actix_web::main]
    #[test]
    async fn transport_failures_are_logged_not_returned() {
        let (ctx, transport) = setup();
        transport.set_failure(Some("Invalid 'To' phone number".into()));
        let user_id = ID::default();

        let res = execute(send_sms(&user_id), &ctx).await.unwrap();
        assert_eq!(
            res,
            SmsResult {
                success: false,
                error_message: Some("Invalid 'To' phone number".into())
            }
        );

        let logs = ctx.repos.sms_logs.find_by_user(&user_id).await;
        assert_eq!(logs.len(), 1);
        assert!(!logs[0].is_success);
        assert_eq!(
            logs[0].error_message,
            Some("Invalid 'To' phone number".into())
        );
    }
}
