mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use sevent_reminders_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Unsent reminders with `since <= fire_at <= until`, oldest first
    async fn find_unsent_between(&self, since: i64, until: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Unsent reminders with `fire_at < before`, oldest first
    async fn find_unsent_before(&self, before: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Flips `sent` from `false` to `true`. This is the only write done to an
    /// existing reminder.
    ///
    /// Returns `false` when the reminder was already sent (or does not exist),
    /// which means some other dispatch cycle committed it first.
    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::ReminderContext;
    use sevent_reminders_domain::{Reminder, ID};

    const NOW: i64 = 1613862000000;

    fn reminder_at(fire_at: i64) -> Reminder {
        Reminder::new(ID::default(), ID::default(), fire_at)
    }

    #[tokio::test]
    async fn finds_unsent_reminders_in_range() {
        let ctx = ReminderContext::create_inmemory();
        let repo = &ctx.repos.reminders;

        let too_old = reminder_at(NOW - 1000 * 500);
        let lower_bound = reminder_at(NOW - 1000 * 120);
        let due = reminder_at(NOW - 1000 * 30);
        let upper_bound = reminder_at(NOW);
        let future = reminder_at(NOW + 1);
        let mut already_sent = reminder_at(NOW - 1000 * 10);
        already_sent.sent = true;
        for r in &[
            &future,
            &upper_bound,
            &due,
            &lower_bound,
            &too_old,
            &already_sent,
        ] {
            repo.insert(r).await.expect("To insert reminder");
        }

        let found = repo
            .find_unsent_between(NOW - 1000 * 120, NOW)
            .await
            .expect("To query reminders");
        let found_ids = found.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(found_ids, vec![lower_bound.id, due.id, upper_bound.id]);

        let missed = repo
            .find_unsent_before(NOW - 1000 * 120)
            .await
            .expect("To query reminders");
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].id, too_old.id);
    }

    #[tokio::test]
    async fn mark_sent_only_succeeds_once() {
        let ctx = ReminderContext::create_inmemory();
        let repo = &ctx.repos.reminders;
        let reminder = reminder_at(NOW);
        repo.insert(&reminder).await.expect("To insert reminder");

        let (first, second) = futures::join!(
            repo.mark_sent(&reminder.id),
            repo.mark_sent(&reminder.id)
        );
        let wins = vec![first.unwrap(), second.unwrap()]
            .into_iter()
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
        assert!(!repo.mark_sent(&reminder.id).await.unwrap());
        assert!(repo.find(&reminder.id).await.unwrap().sent);

        assert!(repo
            .find_unsent_between(NOW - 1000 * 120, NOW)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn mark_sent_on_unknown_reminder_is_not_a_win() {
        let ctx = ReminderContext::create_inmemory();
        assert!(!ctx.repos.reminders.mark_sent(&ID::default()).await.unwrap());
    }
}
