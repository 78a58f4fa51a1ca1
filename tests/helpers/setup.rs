use sevent_reminders_api::Application;
use sevent_reminders_domain::{Event, Locale, Reminder, User};
use sevent_reminders_infra::{InMemoryEmailGateway, ReminderContext, StaticTimeSys};
use sevent_reminders_sdk::SeventRemindersSDK;
use std::sync::Arc;

pub const NOW: i64 = 1613862000000;
pub const CRON_SECRET: &str = "test-cron-secret";

pub struct TestApp {
    pub ctx: ReminderContext,
    pub email: Arc<InMemoryEmailGateway>,
    pub address: String,
}

impl TestApp {
    pub async fn insert_user(&self, email: &str, name: &str) -> User {
        let user = User::new(email, name);
        self.ctx
            .repos
            .users
            .insert(&user)
            .await
            .expect("To insert user");
        user
    }

    pub async fn insert_event(&self, title: &str) -> Event {
        let event = Event {
            id: Default::default(),
            title: Some(title.into()),
            start_ts: Some(NOW + 1000 * 60 * 60 * 2),
            location: Some("Nhà hát Lớn".into()),
        };
        self.ctx
            .repos
            .events
            .insert(&event)
            .await
            .expect("To insert event");
        event
    }

    pub async fn insert_reminder(&self, user: &User, event: &Event, fire_at: i64) -> Reminder {
        let reminder = Reminder::new(user.id.clone(), event.id.clone(), fire_at);
        self.ctx
            .repos
            .reminders
            .insert(&reminder)
            .await
            .expect("To insert reminder");
        reminder
    }

    pub async fn is_sent(&self, reminder: &Reminder) -> bool {
        self.ctx
            .repos
            .reminders
            .find(&reminder.id)
            .await
            .expect("Reminder to exist")
            .sent
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, SeventRemindersSDK) {
    spawn_app_with(|_| ()).await
}

/// Like `spawn_app` but lets the test adjust the context before the
/// application starts
pub async fn spawn_app_with<F>(customize: F) -> (TestApp, SeventRemindersSDK)
where
    F: FnOnce(&mut ReminderContext),
{
    let mut ctx = ReminderContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.cron_secret = Some(CRON_SECRET.into());
    ctx.config.notification.locale = Locale::en_US;
    ctx.sys = Arc::new(StaticTimeSys(NOW));
    let email = Arc::new(InMemoryEmailGateway::new());
    ctx.email = email.clone();
    customize(&mut ctx);

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = SeventRemindersSDK::new(address.clone(), CRON_SECRET);
    let app = TestApp {
        ctx,
        email,
        address,
    };
    (app, sdk)
}
