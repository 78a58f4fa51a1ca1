use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sevent_reminders_api_structs::{check_reminders, get_missed_reminders};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers one dispatch cycle and returns its statistics
    pub async fn check(&self) -> APIResponse<check_reminders::APIResponse> {
        self.base.get("check-reminders".into(), StatusCode::OK).await
    }

    pub async fn get_missed(&self) -> APIResponse<get_missed_reminders::APIResponse> {
        self.base
            .get("reminders/missed".into(), StatusCode::OK)
            .await
    }
}
