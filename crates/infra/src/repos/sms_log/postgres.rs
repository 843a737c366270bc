use super::ISmsLogRepo;
use guardian_reminders_domain::{SmsLog, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresSmsLogRepo {
    pool: PgPool,
}

impl PostgresSmsLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SmsLogRaw {
    log_uid: Uuid,
    user_uid: Uuid,
    is_success: bool,
    from_number: String,
    to_number: String,
    message: String,
    error_message: Option<String>,
    created: i64,
}

impl From<SmsLogRaw> for SmsLog {
    fn from(raw: SmsLogRaw) -> Self {
        Self {
            id: raw.log_uid.into(),
            user_id: raw.user_uid.into(),
            is_success: raw.is_success,
            from_number: raw.from_number,
            to_number: raw.to_number,
            message: raw.message,
            error_message: raw.error_message,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl ISmsLogRepo for PostgresSmsLogRepo {
    async fn insert(&self, log: &SmsLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sms_logs
            (log_uid, user_uid, is_success, from_number, to_number, message, error_message, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.user_id.inner_ref())
        .bind(log.is_success)
        .bind(&log.from_number)
        .bind(&log.to_number)
        .bind(&log.message)
        .bind(&log.error_message)
        .bind(log.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<SmsLog> {
        sqlx::query_as::<_, SmsLogRaw>(
            r#"
            SELECT * FROM sms_logs AS l
            WHERE l.user_uid = $1
            ORDER BY l.created
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|log| log.into())
        .collect()
    }
}
