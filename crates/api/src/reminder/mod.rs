mod due_set;
mod get_missed_reminders;
pub mod send_due_reminders;

use actix_web::web;
use get_missed_reminders::get_missed_reminders_controller;
use send_due_reminders::check_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/check-reminders",
        web::get().to(check_reminders_controller),
    );
    cfg.route(
        "/reminders/missed",
        web::get().to(get_missed_reminders_controller),
    );
}
