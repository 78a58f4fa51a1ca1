use crate::shared::entity::{Entity, ID};
use serde::Serialize;

/// A `Reminder` represents a point in time at which the owning `User`
/// should receive an email about an `Event`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` who should receive the reminder email. Lookup only.
    pub user_id: ID,
    /// The `Event` this `Reminder` is about. Lookup only.
    pub event_id: ID,
    /// The timestamp in millis at which the reminder should be sent
    pub fire_at: i64,
    /// Free text written by the user when creating the reminder
    pub note: Option<String>,
    /// Only ever goes from `false` to `true`
    pub sent: bool,
}

impl Reminder {
    pub fn new(user_id: ID, event_id: ID, fire_at: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            event_id,
            fire_at,
            note: None,
            sent: false,
        }
    }

    /// Unsent and `fire_at` within `[now - window, now]`
    pub fn is_due(&self, now: i64, window: i64) -> bool {
        !self.sent && self.fire_at >= now - window && self.fire_at <= now
    }

    /// Unsent and already too old to ever be picked up by a dispatch cycle
    pub fn is_missed(&self, now: i64, window: i64) -> bool {
        !self.sent && self.fire_at < now - window
    }

    /// The note with surrounding whitespace removed, `None` when blank
    pub fn trimmed_note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// What happened to a single `Reminder` during a dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// Email delivered and the `sent` flag was committed by this cycle
    Sent,
    /// Lookup, delivery or persistence failed. The reminder stays unsent.
    Failed,
    /// Another cycle already committed the reminder
    Skipped,
}

/// Aggregated statistics of one dispatch cycle. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DispatchOutcome {
    pub fn record(&mut self, outcome: ReminderOutcome) {
        self.total += 1;
        match outcome {
            ReminderOutcome::Sent => self.sent += 1,
            ReminderOutcome::Failed => self.failed += 1,
            ReminderOutcome::Skipped => self.skipped += 1,
        }
    }
}

impl std::iter::FromIterator<ReminderOutcome> for DispatchOutcome {
    fn from_iter<I: IntoIterator<Item = ReminderOutcome>>(iter: I) -> Self {
        let mut outcome = Self::default();
        for o in iter {
            outcome.record(o);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: i64 = 1000 * 120;
    const NOW: i64 = 1613862000000;

    fn reminder_at(fire_at: i64) -> Reminder {
        Reminder::new(Default::default(), Default::default(), fire_at)
    }

    #[test]
    fn due_window_is_inclusive_on_both_ends() {
        assert!(reminder_at(NOW).is_due(NOW, WINDOW));
        assert!(reminder_at(NOW - WINDOW).is_due(NOW, WINDOW));
        assert!(reminder_at(NOW - 1000 * 30).is_due(NOW, WINDOW));
        assert!(!reminder_at(NOW - WINDOW - 1).is_due(NOW, WINDOW));
        assert!(!reminder_at(NOW + 1).is_due(NOW, WINDOW));
    }

    #[test]
    fn sent_reminder_is_never_due_or_missed() {
        for fire_at in &[NOW, NOW - 1000 * 30, NOW - WINDOW * 10, NOW + WINDOW] {
            let mut reminder = reminder_at(*fire_at);
            reminder.sent = true;
            assert!(!reminder.is_due(NOW, WINDOW));
            assert!(!reminder.is_missed(NOW, WINDOW));
        }
    }

    #[test]
    fn reminder_older_than_window_is_missed() {
        let reminder = reminder_at(NOW - 1000 * 500);
        assert!(!reminder.is_due(NOW, WINDOW));
        assert!(reminder.is_missed(NOW, WINDOW));
        assert!(!reminder_at(NOW - WINDOW).is_missed(NOW, WINDOW));
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut reminder = reminder_at(NOW);
        assert_eq!(reminder.trimmed_note(), None);
        reminder.note = Some("   \n".into());
        assert_eq!(reminder.trimmed_note(), None);
        reminder.note = Some("  bring tickets ".into());
        assert_eq!(reminder.trimmed_note(), Some("bring tickets"));
    }

    #[test]
    fn aggregates_outcomes() {
        let outcome = vec![
            ReminderOutcome::Sent,
            ReminderOutcome::Failed,
            ReminderOutcome::Sent,
            ReminderOutcome::Skipped,
        ]
        .into_iter()
        .collect::<DispatchOutcome>();
        assert_eq!(
            outcome,
            DispatchOutcome {
                total: 4,
                sent: 2,
                failed: 1,
                skipped: 1,
            }
        );
    }
}
