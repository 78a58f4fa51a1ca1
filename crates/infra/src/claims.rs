use sevent_reminders_domain::ID;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

/// Reminders currently being delivered by a dispatch cycle of this process.
///
/// Nothing here is persisted. A crash simply forgets the claims and the
/// reminders stay unsent in the store.
#[derive(Debug, Default)]
pub struct InFlightReminders {
    ids: Mutex<HashSet<ID>>,
}

impl InFlightReminders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the reminder for the caller, `None` when another cycle holds it.
    /// The claim is released when the returned guard is dropped.
    pub fn try_claim(self: &Arc<Self>, reminder_id: &ID) -> Option<ReminderClaim> {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        if !ids.insert(reminder_id.clone()) {
            return None;
        }
        Some(ReminderClaim {
            claims: Arc::clone(self),
            reminder_id: reminder_id.clone(),
        })
    }

    pub fn is_claimed(&self, reminder_id: &ID) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(reminder_id)
    }
}

#[derive(Debug)]
pub struct ReminderClaim {
    claims: Arc<InFlightReminders>,
    reminder_id: ID,
}

impl Drop for ReminderClaim {
    fn drop(&mut self) {
        self.claims
            .ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.reminder_id);
    }
}
