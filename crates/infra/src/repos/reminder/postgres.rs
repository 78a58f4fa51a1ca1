use super::IReminderRepo;
use sevent_reminders_domain::{Reminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    event_uid: Uuid,
    fire_at: i64,
    note: Option<String>,
    sent: bool,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            event_id: raw.event_uid.into(),
            fire_at: raw.fire_at,
            note: raw.note,
            sent: raw.sent,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, event_uid, fire_at, note, sent)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.event_id.inner_ref())
        .bind(reminder.fire_at)
        .bind(&reminder.note)
        .bind(reminder.sent)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to find reminder with id: {}. Error: {:?}", reminder_id, e);
            None
        })
        .map(|reminder| reminder.into())
    }

    async fn find_unsent_between(&self, since: i64, until: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.sent = false AND
            r.fire_at >= $1 AND
            r.fire_at <= $2
            ORDER BY r.fire_at ASC
            "#,
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_unsent_before(&self, before: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.sent = false AND
            r.fire_at < $1
            ORDER BY r.fire_at ASC
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        // Only the cycle that flips the flag wins
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET sent = true
            WHERE reminder_uid = $1 AND sent = false
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }
}
