use super::send_sms::SendSmsUseCase;
use crate::{
    shared::usecase::{execute, UseCase},
    user::{find_user, UserLookupError},
};
use guardian_reminders_infra::GuardianContext;
use tracing::{error, info, warn};

/// Delivers every unexecuted `ReminderSchedule` whose fire-time lies within
/// the trailing window ending now.
///
/// Each row is claimed before it is sent so that concurrent sweeps deliver
/// a row at most once. A row that fails to send stays executed.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {
    pub window_millis: i64,
}

#[derive(Debug, Default, PartialEq)]
pub struct SendDueRemindersSummary {
    /// Due rows found by the sweep
    pub selected: usize,
    /// Rows this sweep marked as executed
    pub claimed: usize,
    pub sent: usize,
    /// Claimed rows that could not be delivered
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = SendDueRemindersSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx
            .repos
            .reminder_schedules
            .find_due(now - self.window_millis, now)
            .await
            .map_err(|e| {
                error!("Unable to find due reminder schedules. Err: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut summary = SendDueRemindersSummary {
            selected: due.len(),
            ..Default::default()
        };

        for schedule in due {
            let schedule = match ctx
                .repos
                .reminder_schedules
                .claim(&schedule.id, now)
                .await
                .map_err(|e| {
                    error!("Unable to claim schedule {}. Err: {:?}", schedule.id, e);
                    UseCaseError::StorageError
                })? {
                Some(schedule) => schedule,
                // Claimed by another sweep or purged in the meantime
                None => continue,
            };
            summary.claimed += 1;

            let user = match find_user(&schedule.user_id, ctx).await {
                Ok(user) => user,
                Err(UserLookupError::StorageError) => return Err(UseCaseError::StorageError),
                Err(UserLookupError::NotFound(_)) => {
                    warn!(
                        "User {} of reminder schedule {} was not found, skipping it",
                        schedule.user_id, schedule.id
                    );
                    summary.failed += 1;
                    continue;
                }
            };

            let send_sms = SendSmsUseCase {
                user_id: user.id,
                cellphone: user.cellphone,
                message: schedule.notification_text(),
            };
            let result = match execute(send_sms, ctx).await {
                Ok(result) => result,
                Err(e) => match e {},
            };
            if result.success {
                summary.sent += 1;
            } else {
                summary.failed += 1;
            }
        }

        if summary.selected > 0 {
            info!("Reminder sweep done: {:?}", summary);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::test_helpers::{
        create_reminder, reminder_input, setup_user, YieldingReminderScheduleRepo,
    };
    use guardian_reminders_api_structs::ReminderRequestBody;
    use guardian_reminders_domain::{
        date::{parse_datetime_millis, MINUTE_MILLIS},
        ReminderConfiguration, ReminderType, User, ID,
    };
    use guardian_reminders_infra::{sms::InMemorySmsTransport, IUserRepo, StaticTimeSys};
    use std::sync::Arc;

    struct UnavailableUserRepo;

    #[async_trait::async_trait]
    impl IUserRepo for UnavailableUserRepo {
        async fn insert(&self, _user: &User) -> anyhow::Result<()> {
            Err(anyhow::Error::msg("Connection refused"))
        }

        async fn save(&self, _user: &User) -> anyhow::Result<()> {
            Err(anyhow::Error::msg("Connection refused"))
        }

        async fn find(&self, _user_id: &ID) -> anyhow::Result<Option<User>> {
            Err(anyhow::Error::msg("Connection refused"))
        }
    }

    struct TestContext {
        ctx: GuardianContext,
        transport: Arc<InMemorySmsTransport>,
        user: User,
        reminder: ReminderConfiguration,
    }

    /// Reminder two hours before and at `2024-01-10 09:00:00`
    async fn setup() -> TestContext {
        let (mut ctx, user) = setup_user("2024-01-09 12:00:00").await;
        let transport = Arc::new(InMemorySmsTransport::new());
        ctx.sms = transport.clone();
        ctx.config.sms.country_code = "1".into();
        ctx.config.sms.message_prefix = String::new();

        let input = ReminderRequestBody {
            text: Some("Court hearing at 9".into()),
            reminder_days: None,
            ..reminder_input("2024-01-10T09:00:00")
        };
        let reminder = create_reminder(&ctx, &user, input).await;

        TestContext {
            ctx,
            transport,
            user,
            reminder,
        }
    }

    fn at(ctx: &GuardianContext, datetime: &str) -> GuardianContext {
        let mut ctx = ctx.clone();
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp: parse_datetime_millis(datetime).unwrap(),
        });
        ctx
    }

    fn sweep() -> SendDueRemindersUseCase {
        SendDueRemindersUseCase {
            window_millis: 15 * MINUTE_MILLIS,
        }
    }

    #[actix_web::main]
    #[test]
    async fn delivers_due_rows_once() {
        let TestContext {
            ctx,
            transport,
            user,
            reminder,
        } = setup().await;

        let summary = execute(sweep(), &at(&ctx, "2024-01-10 09:05:00"))
            .await
            .unwrap();
        assert_eq!(
            summary,
            SendDueRemindersSummary {
                selected: 1,
                claimed: 1,
                sent: 1,
                failed: 0
            }
        );
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "+15551234567");
        assert_eq!(sent[0].body, " Guardian Reminder: Court hearing at 9");

        let schedules = ctx
            .repos
            .reminder_schedules
            .find_by_reminder(&reminder.id)
            .await
            .unwrap();
        let event_row = schedules
            .iter()
            .find(|s| s.reminder_type == ReminderType::Event)
            .unwrap();
        assert!(event_row.is_executed);
        assert_eq!(
            event_row.executed_at,
            Some(parse_datetime_millis("2024-01-10 09:05:00").unwrap())
        );
        // The hours reminder at 07:00 was outside of the window
        let hours_row = schedules
            .iter()
            .find(|s| s.reminder_type == ReminderType::HoursBefore)
            .unwrap();
        assert!(!hours_row.is_executed);

        let summary = execute(sweep(), &at(&ctx, "2024-01-10 09:20:00"))
            .await
            .unwrap();
        assert_eq!(summary, SendDueRemindersSummary::default());
        assert_eq!(transport.sent().len(), 1);

        let logs = ctx.repos.sms_logs.find_by_user(&user.id).await;
        assert_eq!(logs.len(), 1);
        assert!(logs[0].is_success);
    }

    #[actix_web::main]
    #[test]
    async fn rows_older_than_window_are_never_sent() {
        let TestContext { ctx, transport, .. } = setup().await;

        let summary = execute(sweep(), &at(&ctx, "2024-01-10 07:16:00"))
            .await
            .unwrap();
        assert_eq!(summary.selected, 0);
        let summary = execute(sweep(), &at(&ctx, "2024-01-10 09:15:01"))
            .await
            .unwrap();
        assert_eq!(summary.selected, 0);
        assert!(transport.sent().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn concurrent_sweeps_send_each_row_once() {
        let TestContext { mut ctx, transport, .. } = setup().await;
        ctx.repos.reminder_schedules = Arc::new(YieldingReminderScheduleRepo::new(
            ctx.repos.reminder_schedules.clone(),
        ));
        let ctx = at(&ctx, "2024-01-10 09:00:00");

        let (first, second) = futures::join!(execute(sweep(), &ctx), execute(sweep(), &ctx));
        let (first, second) = (first.unwrap(), second.unwrap());
        // Both sweeps selected the row before either of them claimed it
        assert_eq!(first.selected, 1);
        assert_eq!(second.selected, 1);
        assert_eq!(first.claimed + second.claimed, 1);
        assert_eq!(first.sent + second.sent, 1);
        assert_eq!(transport.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn failed_sends_stay_executed() {
        let TestContext {
            ctx,
            transport,
            user,
            reminder,
        } = setup().await;
        transport.set_failure(Some("Carrier unreachable".into()));

        let summary = execute(sweep(), &at(&ctx, "2024-01-10 07:05:00"))
            .await
            .unwrap();
        assert_eq!(summary.claimed, 1);
        assert_eq!(summary.failed, 1);

        transport.set_failure(None);
        let summary = execute(sweep(), &at(&ctx, "2024-01-10 07:10:00"))
            .await
            .unwrap();
        assert_eq!(summary, SendDueRemindersSummary::default());
        assert!(transport.sent().is_empty());

        let logs = ctx.repos.sms_logs.find_by_user(&user.id).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].error_message, Some("Carrier unreachable".into()));

        let pending = ctx
            .repos
            .reminder_schedules
            .find_by_reminder(&reminder.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|s| !s.is_executed)
            .count();
        assert_eq!(pending, 1);
    }

    #[actix_web::main]
    #[test]
    async fn skips_rows_of_unknown_users() {
        let TestContext {
            ctx,
            transport,
            mut user,
            ..
        } = setup().await;
        user.is_deleted = true;
        ctx.repos.users.save(&user).await.unwrap();

        let summary = execute(sweep(), &at(&ctx, "2024-01-10 09:05:00"))
            .await
            .unwrap();
        assert_eq!(
            summary,
            SendDueRemindersSummary {
                selected: 1,
                claimed: 1,
                sent: 0,
                failed: 1
            }
        );
        assert!(transport.sent().is_empty());

        // The row stays executed
        let summary = execute(sweep(), &at(&ctx, "2024-01-10 09:06:00"))
            .await
            .unwrap();
        assert_eq!(summary.selected, 0);
    }

    #[actix_web::main]
    #[test]
    async fn user_storage_errors_abort_the_sweep() {
        let TestContext { mut ctx, transport, .. } = setup().await;
        ctx.repos.users = Arc::new(UnavailableUserRepo);

        let res = execute(sweep(), &at(&ctx, "2024-01-10 09:05:00")).await;
        assert!(matches!(res, Err(UseCaseError::StorageError)));
        assert!(transport.sent().is_empty());
    }
}
