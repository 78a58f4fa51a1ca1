use crate::{reminder::send_due_reminders::SendDueRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use sevent_reminders_infra::ReminderContext;
use std::time::Duration;
use tracing::{error, info};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs a dispatch cycle every `interval_secs` without waiting for an
/// external trigger. Intervals made of whole minutes start at the next full
/// minute. A cycle that runs long may overlap with the next one.
pub fn start_send_reminders_job(ctx: ReminderContext, interval_secs: u64) {
    actix_web::rt::spawn(async move {
        if interval_secs % 60 == 0 {
            let now = ctx.sys.get_timestamp_millis();
            let secs_to_next_run = get_start_delay(now as usize, 0);
            sleep_until(Instant::now() + Duration::from_secs(secs_to_next_run as u64)).await;
        }

        let mut cycle_interval = interval(Duration::from_secs(interval_secs));
        loop {
            cycle_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_reminders(context));
        }
    });
}

async fn send_reminders(context: ReminderContext) {
    let now = context.sys.get_timestamp_millis();
    info!("Internal reminder trigger at: {}", now);
    let usecase = SendDueRemindersUseCase::new(now, &context.config);
    if let Err(e) = execute(usecase, &context).await {
        error!("Internally triggered reminder cycle failed: {:?}", e);
    }
}
