mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;
use sevent_reminders_domain::{Event, ID};

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, event: &Event) -> anyhow::Result<()>;
    /// A missing event is a normal outcome, the reminder is sent with placeholders
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;
}
