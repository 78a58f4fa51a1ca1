use sevent_reminders_domain::Reminder;
use sevent_reminders_infra::IReminderRepo;

/// Unsent reminders with `fire_at` in `[now - window, now]`, oldest first
pub async fn select_due(
    repo: &dyn IReminderRepo,
    now: i64,
    window: i64,
) -> anyhow::Result<Vec<Reminder>> {
    let mut reminders = repo.find_unsent_between(now - window, now).await?;
    reminders.retain(|r| r.is_due(now, window));
    reminders.sort_by_key(|r| r.fire_at);
    Ok(reminders)
}

/// Unsent reminders that fell out of the window and will never be sent
pub async fn select_missed(
    repo: &dyn IReminderRepo,
    now: i64,
    window: i64,
) -> anyhow::Result<Vec<Reminder>> {
    let mut reminders = repo.find_unsent_before(now - window).await?;
    reminders.retain(|r| r.is_missed(now, window));
    reminders.sort_by_key(|r| r.fire_at);
    Ok(reminders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sevent_reminders_domain::ID;
    use sevent_reminders_infra::ReminderContext;

    const NOW: i64 = 1613862000000;
    const WINDOW: i64 = 1000 * 120;

    async fn insert(ctx: &ReminderContext, fire_at: i64, sent: bool) -> Reminder {
        let mut reminder = Reminder::new(ID::default(), ID::default(), fire_at);
        reminder.sent = sent;
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .expect("To insert reminder");
        reminder
    }

    #[actix_web::main]
    #[test]
    async fn sent_reminders_are_never_selected() {
        let ctx = ReminderContext::create_inmemory();
        for fire_at in &[NOW, NOW - 1000 * 30, NOW - WINDOW, NOW - WINDOW * 5] {
            insert(&ctx, *fire_at, true).await;
        }
        let repo = ctx.repos.reminders.as_ref();
        assert!(select_due(repo, NOW, WINDOW).await.unwrap().is_empty());
        assert!(select_missed(repo, NOW, WINDOW).await.unwrap().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn reminders_older_than_window_are_excluded() {
        let ctx = ReminderContext::create_inmemory();
        let missed = insert(&ctx, NOW - 1000 * 500, false).await;
        let due = insert(&ctx, NOW - 1000 * 30, false).await;
        insert(&ctx, NOW + 1000, false).await;

        let repo = ctx.repos.reminders.as_ref();
        let selected = select_due(repo, NOW, WINDOW).await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, due.id);

        let selected = select_missed(repo, NOW, WINDOW).await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, missed.id);
    }

    #[actix_web::main]
    #[test]
    async fn selects_oldest_first() {
        let ctx = ReminderContext::create_inmemory();
        let newest = insert(&ctx, NOW, false).await;
        let oldest = insert(&ctx, NOW - WINDOW, false).await;
        let middle = insert(&ctx, NOW - 1000 * 60, false).await;

        let selected = select_due(ctx.repos.reminders.as_ref(), NOW, WINDOW)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        assert_eq!(selected, vec![oldest.id, middle.id, newest.id]);
    }
}
