use crate::error::ReminderApiError;
use actix_web::HttpRequest;
use sevent_reminders_api_structs::{TriggerDebugInfo, TriggerQuery};
use sevent_reminders_infra::ReminderContext;
use tracing::warn;

pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// Decides whether a caller presenting `provided` may trigger reminder work.
/// Fails closed: no configured secret means nobody is allowed.
pub fn authorize(provided: Option<&str>, configured: Option<&str>) -> bool {
    match (provided, configured) {
        (Some(provided), Some(configured)) if !configured.is_empty() => {
            constant_time_eq(provided.as_bytes(), configured.as_bytes())
        }
        _ => false,
    }
}

/// Compares without returning early on the first differing byte
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// The secret from the `x-cron-secret` header, or the `secret` query
/// parameter when the header is missing
fn provided_secret<'a>(http_req: &'a HttpRequest, query: &'a TriggerQuery) -> Option<&'a str> {
    http_req
        .headers()
        .get(CRON_SECRET_HEADER)
        .and_then(|val| val.to_str().ok())
        .filter(|val| !val.is_empty())
        .or_else(|| query.secret.as_deref().filter(|val| !val.is_empty()))
}

pub fn protect_trigger_route(
    http_req: &HttpRequest,
    query: &TriggerQuery,
    ctx: &ReminderContext,
) -> Result<(), ReminderApiError> {
    let provided = provided_secret(http_req, query);
    let configured = ctx.config.cron_secret.as_deref();
    if authorize(provided, configured) {
        return Ok(());
    }

    let debug_info = TriggerDebugInfo {
        received_secret: if provided.is_some() {
            "provided"
        } else {
            "missing"
        }
        .into(),
        expected_secret: if configured.is_some() {
            "configured"
        } else {
            "not configured"
        }
        .into(),
    };
    warn!(
        "Rejected reminder trigger. Secret {}, expected secret {}",
        debug_info.received_secret, debug_info.expected_secret
    );
    Err(ReminderApiError::Unauthorized(debug_info))
}
