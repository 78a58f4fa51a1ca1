use super::IEventRepo;
use sevent_reminders_domain::{Event, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    title: Option<String>,
    start_ts: Option<i64>,
    location: Option<String>,
}

impl From<EventRaw> for Event {
    fn from(raw: EventRaw) -> Self {
        Self {
            id: raw.event_uid.into(),
            title: raw.title,
            start_ts: raw.start_ts,
            location: raw.location,
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, event: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events(event_uid, title, start_ts, location)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(&event.title)
        .bind(event.start_ts)
        .bind(&event.location)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let event = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to find event with id: {}. Error: {:?}", event_id, e);
            e
        })?;
        Ok(event.map(|event| event.into()))
    }
}
