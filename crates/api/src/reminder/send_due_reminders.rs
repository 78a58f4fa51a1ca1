use super::due_set::{select_due, select_missed};
use crate::{
    error::ReminderApiError,
    shared::{
        trigger_gate::protect_trigger_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use futures::{stream, FutureExt, StreamExt};
use sevent_reminders_api_structs::check_reminders::*;
use sevent_reminders_domain::{
    render, DispatchOutcome, NotificationSettings, Reminder, ReminderOutcome,
};
use sevent_reminders_infra::{Config, ReminderContext};
use std::panic::AssertUnwindSafe;
use tracing::{error, info, warn};

pub async fn check_reminders_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderApiError> {
    protect_trigger_route(&http_req, &query, &ctx)?;

    let now = ctx.sys.get_timestamp_millis();
    info!("Reminder check triggered at: {}", now);
    let usecase = SendDueRemindersUseCase::new(now, &ctx.config);

    execute(usecase, &ctx)
        .await
        .map(|outcome| HttpResponse::Ok().json(APIResponse::new(outcome)))
        .map_err(ReminderApiError::from)
}

/// Sends every reminder that is due at `now` and records which ones went out.
///
/// Each reminder is handled on its own, a failure or panic while handling one
/// of them never stops the others. Nothing is retried within a cycle, an
/// unsent reminder is picked up again by later cycles as long as it is
/// inside the window.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {
    pub now: i64,
    /// Width of the eligibility window in millis
    pub window: i64,
    /// Max number of reminders in flight at once
    pub concurrency: usize,
    pub settings: NotificationSettings,
}

impl SendDueRemindersUseCase {
    pub fn new(now: i64, config: &Config) -> Self {
        Self {
            now,
            window: config.reminder_window_millis,
            concurrency: config.dispatch_concurrency,
            settings: config.notification.clone(),
        }
    }
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
impl UseCase for SendDueRemindersUseCase {
    type Response = DispatchOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let repo = ctx.repos.reminders.as_ref();
        let candidates = select_due(repo, self.now, self.window)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
        info!("Found {} pending reminders", candidates.len());

        match select_missed(repo, self.now, self.window).await {
            Ok(missed) if !missed.is_empty() => warn!(
                "{} unsent reminders are older than the {} ms window and will never be sent",
                missed.len(),
                self.window
            ),
            Ok(_) => (),
            Err(e) => warn!("Unable to look up missed reminders: {:?}", e),
        }

        let settings = &self.settings;
        let outcomes = stream::iter(candidates)
            .map(|reminder| dispatch_isolated(reminder, settings, ctx))
            .buffer_unordered(self.concurrency.max(1))
            .collect::<Vec<_>>()
            .await;
        let outcome = outcomes.into_iter().collect::<DispatchOutcome>();

        info!(
            "Reminder cycle done. Total: {}, sent: {}, failed: {}, skipped: {}",
            outcome.total, outcome.sent, outcome.failed, outcome.skipped
        );
        Ok(outcome)
    }
}

/// A panic while handling one reminder only fails that reminder
async fn dispatch_isolated(
    reminder: Reminder,
    settings: &NotificationSettings,
    ctx: &ReminderContext,
) -> ReminderOutcome {
    let reminder_id = reminder.id.clone();
    match AssertUnwindSafe(dispatch_reminder(reminder, settings, ctx))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => {
            error!("Panic while processing reminder {}", reminder_id);
            ReminderOutcome::Failed
        }
    }
}

async fn dispatch_reminder(
    reminder: Reminder,
    settings: &NotificationSettings,
    ctx: &ReminderContext,
) -> ReminderOutcome {
    // Released once the outcome is committed
    let _claim = match ctx.in_flight.try_claim(&reminder.id) {
        Some(claim) => claim,
        None => {
            info!("Reminder {} is being delivered by another cycle", reminder.id);
            return ReminderOutcome::Skipped;
        }
    };

    let user = match ctx.repos.users.find(&reminder.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(
                "Failed reminder {}: user {} not found",
                reminder.id, reminder.user_id
            );
            return ReminderOutcome::Failed;
        }
        Err(e) => {
            warn!(
                "Failed reminder {}: unable to look up user {}. Error: {:?}",
                reminder.id, reminder.user_id, e
            );
            return ReminderOutcome::Failed;
        }
    };
    let event = match ctx.repos.events.find(&reminder.event_id).await {
        Ok(event) => event,
        Err(e) => {
            warn!(
                "Failed reminder {}: unable to look up event {}. Error: {:?}",
                reminder.id, reminder.event_id, e
            );
            return ReminderOutcome::Failed;
        }
    };
    if event.is_none() {
        warn!(
            "Event {} of reminder {} not found, sending with placeholders",
            reminder.event_id, reminder.id
        );
    }

    // Another cycle may have committed the reminder after the due set was read
    match ctx.repos.reminders.find(&reminder.id).await {
        Some(current) if current.sent => {
            info!("Reminder {} already sent by another cycle", reminder.id);
            return ReminderOutcome::Skipped;
        }
        Some(_) => (),
        None => {
            warn!("Failed reminder {}: no longer in the store", reminder.id);
            return ReminderOutcome::Failed;
        }
    }

    info!(
        "Processing reminder {} for user {}",
        reminder.id, reminder.user_id
    );
    let notification = render(&reminder, &user, event.as_ref(), settings);
    if let Err(e) = ctx
        .email
        .send(&user.email, &notification.subject, &notification.body)
        .await
    {
        warn!("Failed reminder {}: {}", reminder.id, e);
        return ReminderOutcome::Failed;
    }

    match ctx.repos.reminders.mark_sent(&reminder.id).await {
        Ok(true) => {
            info!("Sent reminder {}", reminder.id);
            ReminderOutcome::Sent
        }
        Ok(false) => {
            warn!(
                "Reminder {} was committed by a cycle of another instance while this cycle was delivering it",
                reminder.id
            );
            ReminderOutcome::Skipped
        }
        Err(e) => {
            error!(
                "Persistence failure: reminder {} was delivered but could not be marked as sent and will be delivered again. Error: {:?}",
                reminder.id, e
            );
            ReminderOutcome::Failed
        }
    }
}
