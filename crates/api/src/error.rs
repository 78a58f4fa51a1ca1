use actix_web::{http::StatusCode, HttpResponse};
use sevent_reminders_api_structs::{ErrorResponse, TriggerDebugInfo};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReminderApiError {
    #[error("Server error")]
    InternalError(String),
    #[error("Unauthorized")]
    Unauthorized(TriggerDebugInfo),
    #[error("Route not found: {0}")]
    NotFound(String),
}

impl actix_web::error::ResponseError for ReminderApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, debug) = match self {
            Self::InternalError(e) => (Some(e.clone()), None),
            Self::Unauthorized(debug) => (None, Some(debug.clone())),
            Self::NotFound(_) => (None, None),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            message: self.to_string(),
            error,
            debug,
        })
    }
}
