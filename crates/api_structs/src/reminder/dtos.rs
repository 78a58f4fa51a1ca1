use sevent_reminders_domain::{DispatchOutcome, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchStatsDTO {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DispatchStatsDTO {
    pub fn new(outcome: DispatchOutcome) -> Self {
        Self {
            total: outcome.total,
            sent: outcome.sent,
            failed: outcome.failed,
            skipped: outcome.skipped,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub event_id: ID,
    pub fire_at: i64,
    pub note: Option<String>,
    pub sent: bool,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            event_id: reminder.event_id,
            fire_at: reminder.fire_at,
            note: reminder.note,
            sent: reminder.sent,
        }
    }
}
