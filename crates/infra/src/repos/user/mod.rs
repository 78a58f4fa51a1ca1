mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use sevent_reminders_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    /// A missing user is a normal outcome, reminders only hold a weak reference
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
}
