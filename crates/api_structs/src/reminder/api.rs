use crate::dtos::{DispatchStatsDTO, ReminderDTO};
use serde::{Deserialize, Serialize};
use sevent_reminders_domain::{DispatchOutcome, Reminder};

/// Where the trigger secret can be passed when it is not sent as a header
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TriggerQuery {
    pub secret: Option<String>,
}

pub mod check_reminders {
    use super::*;

    pub type QueryParams = TriggerQuery;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub stats: DispatchStatsDTO,
    }

    impl APIResponse {
        pub fn new(outcome: DispatchOutcome) -> Self {
            Self {
                success: true,
                message: "Reminder check completed".into(),
                stats: DispatchStatsDTO::new(outcome),
            }
        }
    }
}

pub mod get_missed_reminders {
    use super::*;

    pub type QueryParams = TriggerQuery;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                success: true,
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}
