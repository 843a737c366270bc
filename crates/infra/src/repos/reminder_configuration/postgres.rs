use super::IReminderConfigurationRepo;
use guardian_reminders_domain::{ReminderConfiguration, ReminderOffset, ReminderSettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderConfigurationRepo {
    pool: PgPool,
}

impl PostgresReminderConfigurationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderConfigurationRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    created_by: Option<Uuid>,
    title: String,
    text: String,
    event_ts: i64,
    reminder_days: Option<i64>,
    reminder_hours: Option<i64>,
    reminder_minutes: Option<i64>,
    send_event_reminder: bool,
    is_active: bool,
    is_expired: bool,
    is_deleted: bool,
    last_executed_at: Option<i64>,
    created: i64,
    updated: i64,
}

#[derive(Debug, FromRow)]
struct ReminderIdRaw {
    reminder_uid: Uuid,
}

fn to_offset(value: Option<i64>) -> ReminderOffset {
    ReminderOffset::from_option(value).unwrap_or_default()
}

impl From<ReminderConfigurationRaw> for ReminderConfiguration {
    fn from(raw: ReminderConfigurationRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            created_by: raw.created_by.map(|id| id.into()),
            settings: ReminderSettings {
                title: raw.title,
                text: raw.text,
                event_ts: raw.event_ts,
                reminder_days: to_offset(raw.reminder_days),
                reminder_hours: to_offset(raw.reminder_hours),
                reminder_minutes: to_offset(raw.reminder_minutes),
                send_event_reminder: raw.send_event_reminder,
            },
            is_active: raw.is_active,
            is_expired: raw.is_expired,
            is_deleted: raw.is_deleted,
            last_executed_at: raw.last_executed_at,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderConfigurationRepo for PostgresReminderConfigurationRepo {
    async fn insert(&self, reminder: &ReminderConfiguration) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_configurations
            (reminder_uid, user_uid, created_by, title, text, event_ts, reminder_days,
            reminder_hours, reminder_minutes, send_event_reminder, is_active, is_expired,
            is_deleted, last_executed_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.created_by.as_ref().map(|id| *id.inner_ref()))
        .bind(&reminder.settings.title)
        .bind(&reminder.settings.text)
        .bind(reminder.settings.event_ts)
        .bind(reminder.settings.reminder_days.as_option())
        .bind(reminder.settings.reminder_hours.as_option())
        .bind(reminder.settings.reminder_minutes.as_option())
        .bind(reminder.settings.send_event_reminder)
        .bind(reminder.is_active)
        .bind(reminder.is_expired)
        .bind(reminder.is_deleted)
        .bind(reminder.last_executed_at)
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &ReminderConfiguration) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_configurations
            SET title = $2,
            text = $3,
            event_ts = $4,
            reminder_days = $5,
            reminder_hours = $6,
            reminder_minutes = $7,
            send_event_reminder = $8,
            is_active = $9,
            is_expired = $10,
            is_deleted = $11,
            last_executed_at = $12,
            updated = $13
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.settings.title)
        .bind(&reminder.settings.text)
        .bind(reminder.settings.event_ts)
        .bind(reminder.settings.reminder_days.as_option())
        .bind(reminder.settings.reminder_hours.as_option())
        .bind(reminder.settings.reminder_minutes.as_option())
        .bind(reminder.settings.send_event_reminder)
        .bind(reminder.is_active)
        .bind(reminder.is_expired)
        .bind(reminder.is_deleted)
        .bind(reminder.last_executed_at)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<ReminderConfiguration> {
        sqlx::query_as::<_, ReminderConfigurationRaw>(
            r#"
            SELECT * FROM reminder_configurations AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|r| r.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<ReminderConfiguration> {
        sqlx::query_as::<_, ReminderConfigurationRaw>(
            r#"
            SELECT * FROM reminder_configurations AS r
            WHERE r.user_uid = $1
            ORDER BY r.event_ts DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.into())
        .collect()
    }

    async fn find_schedulable(
        &self,
        user_id: &ID,
        reminder_id: &ID,
    ) -> anyhow::Result<Option<ReminderConfiguration>> {
        let reminder = sqlx::query_as::<_, ReminderConfigurationRaw>(
            r#"
            SELECT * FROM reminder_configurations AS r
            WHERE r.reminder_uid = $1 AND r.user_uid = $2
            AND r.is_deleted = false AND r.is_active = true AND r.is_expired = false
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder.map(|r| r.into()))
    }

    async fn find_pending_generation(
        &self,
        generated_before: i64,
    ) -> anyhow::Result<Vec<ReminderConfiguration>> {
        let reminders = sqlx::query_as::<_, ReminderConfigurationRaw>(
            r#"
            SELECT * FROM reminder_configurations AS r
            WHERE r.is_deleted = false AND r.is_active = true AND r.is_expired = false
            AND (r.last_executed_at IS NULL OR r.last_executed_at < $1)
            "#,
        )
        .bind(generated_before)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn set_last_executed_at(&self, reminder_id: &ID, timestamp: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_configurations
            SET last_executed_at = $2
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn expire_passed(&self, now: i64) -> anyhow::Result<Vec<ID>> {
        let expired = sqlx::query_as::<_, ReminderIdRaw>(
            r#"
            UPDATE reminder_configurations AS r
            SET is_expired = true
            WHERE r.is_deleted = false AND r.is_active = true AND r.is_expired = false
            AND r.event_ts < $1
            RETURNING r.reminder_uid
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(expired.into_iter().map(|r| r.reminder_uid.into()).collect())
    }
}
