use super::due_set::select_missed;
use crate::{
    error::ReminderApiError,
    shared::{
        trigger_gate::protect_trigger_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sevent_reminders_api_structs::get_missed_reminders::*;
use sevent_reminders_domain::Reminder;
use sevent_reminders_infra::ReminderContext;

pub async fn get_missed_reminders_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderApiError> {
    protect_trigger_route(&http_req, &query, &ctx)?;

    let usecase = GetMissedRemindersUseCase {
        now: ctx.sys.get_timestamp_millis(),
        window: ctx.config.reminder_window_millis,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(ReminderApiError::from)
}

/// Lists unsent reminders that fell out of the window without being sent
#[derive(Debug)]
pub struct GetMissedRemindersUseCase {
    pub now: i64,
    pub window: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(String),
}

impl From<UseCaseError> for ReminderApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(e) => Self::InternalError(e),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMissedRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMissedReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        select_missed(ctx.repos.reminders.as_ref(), self.now, self.window)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
