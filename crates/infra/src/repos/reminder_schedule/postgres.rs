use super::IReminderScheduleRepo;
use crate::repos::shared::repo::DeleteResult;
use guardian_reminders_domain::{ReminderSchedule, ReminderType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::{collections::HashSet, convert::TryFrom};
use tracing::error;

pub struct PostgresReminderScheduleRepo {
    pool: PgPool,
}

impl PostgresReminderScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderScheduleRaw {
    schedule_uid: Uuid,
    user_uid: Uuid,
    reminder_uid: Uuid,
    reminder_type: i16,
    text: String,
    date_time: i64,
    is_executed: bool,
    executed_at: Option<i64>,
}

impl ReminderScheduleRaw {
    fn into_domain(self) -> Option<ReminderSchedule> {
        let reminder_type = match ReminderType::try_from(self.reminder_type) {
            Ok(reminder_type) => reminder_type,
            Err(e) => {
                error!("Skipping reminder schedule {}: {:?}", self.schedule_uid, e);
                return None;
            }
        };
        Some(ReminderSchedule {
            id: self.schedule_uid.into(),
            user_id: self.user_uid.into(),
            reminder_id: self.reminder_uid.into(),
            reminder_type,
            text: self.text,
            date_time: self.date_time,
            is_executed: self.is_executed,
            executed_at: self.executed_at,
        })
    }
}

fn into_schedules(raws: Vec<ReminderScheduleRaw>) -> Vec<ReminderSchedule> {
    raws.into_iter().filter_map(|s| s.into_domain()).collect()
}

#[async_trait::async_trait]
impl IReminderScheduleRepo for PostgresReminderScheduleRepo {
    async fn replace_pending(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        schedules: &[ReminderSchedule],
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        let mut tx = self.pool.begin().await?;
        // Concurrent generations of the same reminder wait on this row lock
        sqlx::query(
            r#"
            SELECT r.reminder_uid FROM reminder_configurations AS r
            WHERE r.reminder_uid = $1
            FOR UPDATE
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM reminder_schedules AS s
            WHERE s.user_uid = $1 AND s.reminder_uid = $2 AND s.is_executed = false
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .execute(&mut *tx)
        .await?;

        let executed = sqlx::query_as::<_, ReminderScheduleRaw>(
            r#"
            SELECT * FROM reminder_schedules AS s
            WHERE s.reminder_uid = $1 AND s.is_executed = true
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|s| (s.reminder_type, s.date_time))
        .collect::<HashSet<_>>();

        let inserted = schedules
            .iter()
            .filter(|s| !executed.contains(&(s.reminder_type.code(), s.date_time)))
            .cloned()
            .collect::<Vec<_>>();
        for schedule in &inserted {
            sqlx::query(
                r#"
            INSERT INTO reminder_schedules
            (schedule_uid, user_uid, reminder_uid, reminder_type, text, date_time,
            is_executed, executed_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
            )
            .bind(schedule.id.inner_ref())
            .bind(schedule.user_id.inner_ref())
            .bind(schedule.reminder_id.inner_ref())
            .bind(schedule.reminder_type.code())
            .bind(&schedule.text)
            .bind(schedule.date_time)
            .bind(schedule.is_executed)
            .bind(schedule.executed_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(inserted)
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>> {
        let schedules = sqlx::query_as::<_, ReminderScheduleRaw>(
            r#"
            SELECT * FROM reminder_schedules AS s
            WHERE s.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_schedules(schedules))
    }

    async fn find_due(&self, from: i64, to: i64) -> anyhow::Result<Vec<ReminderSchedule>> {
        let schedules = sqlx::query_as::<_, ReminderScheduleRaw>(
            r#"
            SELECT * FROM reminder_schedules AS s
            WHERE s.is_executed = false AND s.date_time >= $1 AND s.date_time <= $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_schedules(schedules))
    }

    async fn claim(
        &self,
        schedule_id: &ID,
        executed_at: i64,
    ) -> anyhow::Result<Option<ReminderSchedule>> {
        let schedule = sqlx::query_as::<_, ReminderScheduleRaw>(
            r#"
            UPDATE reminder_schedules AS s
            SET is_executed = true, executed_at = $2
            WHERE s.schedule_uid = $1 AND s.is_executed = false
            RETURNING *
            "#,
        )
        .bind(schedule_id.inner_ref())
        .bind(executed_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule.and_then(|s| s.into_domain()))
    }

    async fn delete_pending_by_reminder(
        &self,
        user_id: &ID,
        reminder_id: &ID,
    ) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminder_schedules AS s
            WHERE s.user_uid = $1 AND s.reminder_uid = $2 AND s.is_executed = false
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
