use super::create_reminder::CreateReminderUseCase;
use crate::shared::usecase::execute;
use guardian_reminders_api_structs::ReminderRequestBody;
use guardian_reminders_domain::{
    date::parse_datetime_millis, ReminderConfiguration, ReminderSchedule, User, ID,
};
use guardian_reminders_infra::{
    DeleteResult, GuardianContext, IReminderScheduleRepo, StaticTimeSys,
};
use std::sync::Arc;

/// In-memory context pinned at `now` with one registered `User`
pub async fn setup_user(now: &str) -> (GuardianContext, User) {
    let mut ctx = GuardianContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys {
        timestamp: parse_datetime_millis(now).unwrap(),
    });
    let user = User::new("5551234567".into(), 0);
    ctx.repos.users.insert(&user).await.unwrap();
    (ctx, user)
}

/// Reminder one day and two hours before the event, and at the event
pub fn reminder_input(event_datetime: &str) -> ReminderRequestBody {
    ReminderRequestBody {
        title: Some("Court date".into()),
        text: Some("Appear at the county court".into()),
        event_datetime: Some(event_datetime.into()),
        reminder_days: Some(1),
        reminder_hours: Some(2),
        reminder_minutes: None,
        send_event_reminder: true,
    }
}

pub async fn create_reminder(
    ctx: &GuardianContext,
    user: &User,
    input: ReminderRequestBody,
) -> ReminderConfiguration {
    let usecase = CreateReminderUseCase {
        user_id: user.id.clone(),
        actor: None,
        input,
    };
    execute(usecase, ctx).await.unwrap()
}

/// Yields to the executor before every call, so usecases joined on the same
/// task interleave between repository calls
pub struct YieldingReminderScheduleRepo {
    inner: Arc<dyn IReminderScheduleRepo>,
}

impl YieldingReminderScheduleRepo {
    pub fn new(inner: Arc<dyn IReminderScheduleRepo>) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl IReminderScheduleRepo for YieldingReminderScheduleRepo {
    async fn replace_pending(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        schedules: &[ReminderSchedule],
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        tokio::task::yield_now().await;
        self.inner
            .replace_pending(user_id, reminder_id, schedules)
            .await
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>> {
        tokio::task::yield_now().await;
        self.inner.find_by_reminder(reminder_id).await
    }

    async fn find_due(&self, from: i64, to: i64) -> anyhow::Result<Vec<ReminderSchedule>> {
        tokio::task::yield_now().await;
        self.inner.find_due(from, to).await
    }

    async fn claim(
        &self,
        schedule_id: &ID,
        executed_at: i64,
    ) -> anyhow::Result<Option<ReminderSchedule>> {
        tokio::task::yield_now().await;
        self.inner.claim(schedule_id, executed_at).await
    }

    async fn delete_pending_by_reminder(
        &self,
        user_id: &ID,
        reminder_id: &ID,
    ) -> anyhow::Result<DeleteResult> {
        tokio::task::yield_now().await;
        self.inner
            .delete_pending_by_reminder(user_id, reminder_id)
            .await
    }
}
