use crate::shared::entity::{Entity, ID};

/// Read-only projection of the user owning a `Reminder`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            name: name.into(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
