mod event;
mod notification;
mod reminder;
mod shared;
mod user;

pub use chrono::Locale;
pub use chrono_tz::Tz;
pub use event::Event;
pub use notification::{render, Notification, NotificationSettings};
pub use reminder::{DispatchOutcome, Reminder, ReminderOutcome};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
