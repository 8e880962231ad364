use axum::Json;
use axum::extract::State;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::{Reminder, ReminderStatus};
use crate::routes::ApiResponse;
use crate::state::SharedState;
use crate::validation::ValidationErrors;

type ReminderResponse = Json<ApiResponse<Reminder>>;
type ReminderListResponse = Json<ApiResponse<Vec<Reminder>>>;

#[derive(Deserialize, Default)]
pub struct ReminderRequest {
    pub description: Option<Value>,
    pub date_of_origin: Option<Value>,
}

#[derive(Deserialize, Default)]
pub struct StatusRequest {
    pub status: Option<Value>,
}

#[derive(Deserialize)]
pub struct DateQuery {
    pub date_of_origin: Option<String>,
}

impl ReminderRequest {
    fn validate(&self) -> Result<(&str, NaiveDate), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let description = errors.required_string("description", self.description.as_ref());
        let date = errors
            .required_string("date_of_origin", self.date_of_origin.as_ref())
            .and_then(|raw| errors.date("date_of_origin", raw));

        match (description, date) {
            (Some(description), Some(date)) => Ok((description, date)),
            _ => Err(errors),
        }
    }
}

impl StatusRequest {
    fn validate(&self) -> Result<ReminderStatus, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let status = errors
            .required_string("status", self.status.as_ref())
            .filter(|raw| errors.one_of("status", raw, &ReminderStatus::ALL))
            .and_then(|raw| raw.parse().ok());

        status.ok_or(errors)
    }
}

impl DateQuery {
    fn validate(&self) -> Result<NaiveDate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("date_of_origin", self.date_of_origin.as_deref())
            .and_then(|raw| errors.date("date_of_origin", raw))
            .ok_or(errors)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn not_found() -> AppError {
    AppError::NotFound("Reminder not found".to_string())
}

pub async fn store(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppJson(req): AppJson<ReminderRequest>,
) -> Result<ReminderResponse, AppError> {
    let (description, date_of_origin) = req.validate()?;
    let status = ReminderStatus::derive(date_of_origin, today());

    let reminder =
        db::reminders::create(&state.pool, auth.user_id, description, date_of_origin, status)
            .await?;

    tracing::info!(user_id = %auth.user_id, reminder_id = %reminder.id, %status, "reminder created");

    Ok(Json(ApiResponse::ok("Reminder created successfully", reminder)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<ReminderRequest>,
) -> Result<ReminderResponse, AppError> {
    let (description, date_of_origin) = req.validate()?;
    let status = ReminderStatus::derive(date_of_origin, today());

    let reminder = db::reminders::update(
        &state.pool,
        id,
        auth.user_id,
        description,
        date_of_origin,
        status,
    )
    .await?
    .ok_or_else(not_found)?;

    Ok(Json(ApiResponse::ok("Reminder updated successfully", reminder)))
}

pub async fn update_status(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<StatusRequest>,
) -> Result<ReminderResponse, AppError> {
    let status = req.validate()?;

    let reminder = db::reminders::update_status(&state.pool, id, auth.user_id, status)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ApiResponse::ok(
        "Reminder status updated successfully",
        reminder,
    )))
}

pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<ReminderListResponse, AppError> {
    let reminders = db::reminders::list(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::ok("Here are the reminders", reminders)))
}

pub async fn upcoming(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<ReminderListResponse, AppError> {
    let reminders = db::reminders::list_upcoming(&state.pool, auth.user_id, today()).await?;
    Ok(Json(ApiResponse::ok("Here are the upcoming reminders", reminders)))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<ReminderResponse, AppError> {
    let reminder = db::reminders::find_by_id(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(ApiResponse::ok("Here is the reminder for the given id", reminder)))
}

pub async fn for_date(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<ReminderListResponse, AppError> {
    let date = query.validate()?;
    let reminders = db::reminders::list_for_date(&state.pool, auth.user_id, date).await?;
    Ok(Json(ApiResponse::ok(
        "Here are the reminders for the given date",
        reminders,
    )))
}

pub async fn completed(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<ReminderListResponse, AppError> {
    let reminders =
        db::reminders::list_by_status(&state.pool, auth.user_id, ReminderStatus::Completed)
            .await?;
    Ok(Json(ApiResponse::ok(
        "Here are the reminders that are completed",
        reminders,
    )))
}

pub async fn opened(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<ReminderListResponse, AppError> {
    let reminders =
        db::reminders::list_by_status(&state.pool, auth.user_id, ReminderStatus::Opened).await?;
    Ok(Json(ApiResponse::ok(
        "Here are the reminders that are opened",
        reminders,
    )))
}

pub async fn delete_by_id(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = db::reminders::delete(&state.pool, id, auth.user_id).await?;
    if deleted == 0 {
        return Err(not_found());
    }
    Ok(Json(ApiResponse::message("Reminder deleted successfully")))
}

pub async fn delete_for_date(
    auth: AuthUser,
    State(state): State<SharedState>,
    AppQuery(query): AppQuery<DateQuery>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let date = query.validate()?;
    let deleted = db::reminders::delete_for_date(&state.pool, auth.user_id, date).await?;

    tracing::info!(user_id = %auth.user_id, deleted, "reminders deleted for {date}");

    Ok(Json(ApiResponse::message(
        "Your reminders for the given date were deleted successfully",
    )))
}

pub async fn delete_completed(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted =
        db::reminders::delete_by_status(&state.pool, auth.user_id, ReminderStatus::Completed)
            .await?;

    tracing::info!(user_id = %auth.user_id, deleted, "completed reminders deleted");

    Ok(Json(ApiResponse::message(
        "All completed reminders were deleted successfully",
    )))
}
