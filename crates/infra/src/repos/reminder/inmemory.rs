use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use sevent_reminders_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn oldest_first(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders.sort_by_key(|r| r.fire_at);
    reminders
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_unsent_between(&self, since: i64, until: i64) -> anyhow::Result<Vec<Reminder>> {
        let res = find_by(&self.reminders, |r| {
            !r.sent && r.fire_at >= since && r.fire_at <= until
        });
        Ok(oldest_first(res))
    }

    async fn find_unsent_before(&self, before: i64) -> anyhow::Result<Vec<Reminder>> {
        let res = find_by(&self.reminders, |r| !r.sent && r.fire_at < before);
        Ok(oldest_first(res))
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        Ok(update_if(
            reminder_id,
            &self.reminders,
            |r| !r.sent,
            |r| r.sent = true,
        ))
    }
}
