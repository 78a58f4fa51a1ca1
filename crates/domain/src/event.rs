use crate::shared::entity::{Entity, ID};

/// Read-only projection of the event a `Reminder` points at.
///
/// Every field besides the id can be missing, the event documents are owned
/// by another part of the system and are not validated here.
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub id: ID,
    pub title: Option<String>,
    /// Start of the event in millis since epoch
    pub start_ts: Option<i64>,
    pub location: Option<String>,
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}
