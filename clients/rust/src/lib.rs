mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;

pub use sevent_reminders_api_structs::dtos::DispatchStatsDTO as DispatchStats;
pub use sevent_reminders_api_structs::dtos::ReminderDTO as Reminder;
pub use sevent_reminders_domain::ID;

/// Sevent Reminders SDK
///
/// Client for the reminder dispatch API, used by schedulers that trigger
/// dispatch cycles.
#[derive(Clone)]
pub struct SeventRemindersSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl SeventRemindersSDK {
    pub fn new<T: Into<String>>(address: String, cron_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_cron_secret(cron_secret.into());
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
