pub mod auth;
pub mod reminders;

use axum::Router;
use axum::routing::{delete, get, post, put};
use serde::Serialize;

use crate::state::SharedState;

/// `{"success": true, "message": ..., "data": ...}` envelope shared by the
/// registration and reminder endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/register", post(auth::register))
        .route("/api/v1/login", post(auth::login))
        .route("/api/v1/passwordResetLink", post(auth::send_reset_link))
        .route("/api/v1/resetPassword", post(auth::reset_password))
        // Reminders
        .route("/api/v1/createNewReminder", post(reminders::store))
        .route("/api/v1/updateReminder/{id}", put(reminders::update))
        .route("/api/v1/updateReminderStatus/{id}", put(reminders::update_status))
        .route("/api/v1/indexReminder", get(reminders::index))
        .route("/api/v1/getUpComingReminders", get(reminders::upcoming))
        .route("/api/v1/getReminder/{id}", get(reminders::get))
        .route("/api/v1/getReminderForDate", get(reminders::for_date))
        .route("/api/v1/getCompleteReminders", get(reminders::completed))
        .route("/api/v1/getOpenReminders", get(reminders::opened))
        .route("/api/v1/deleteReminderById/{id}", delete(reminders::delete_by_id))
        .route("/api/v1/deleteReminderForDate", delete(reminders::delete_for_date))
        .route("/api/v1/deleteCompleteReminders", delete(reminders::delete_completed))
}
