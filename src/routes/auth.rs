use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::jwt::{Claims, encode_token};
use crate::auth::{password, reset_token};
use crate::db;
use crate::email;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::User;
use crate::models::role::DEFAULT_ROLE;
use crate::routes::ApiResponse;
use crate::state::SharedState;
use crate::validation::ValidationErrors;

const BAD_CREDENTIALS: &str = "Login credentials are invalid.";
const EMAIL_NOT_FOUND: &str = "Email not found on your database";
const BAD_RESET_PAIR: &str = "Either your email or token is wrong.";

// Fields stay raw JSON so a value of the wrong type becomes a field error.

#[derive(Deserialize, Default)]
pub struct RegisterRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub password: Option<Value>,
}

#[derive(Deserialize, Default)]
pub struct LoginRequest {
    pub email: Option<Value>,
    pub password: Option<Value>,
}

#[derive(Deserialize, Default)]
pub struct ResetLinkRequest {
    pub email: Option<Value>,
}

#[derive(Deserialize, Default)]
pub struct ResetPasswordRequest {
    pub email: Option<Value>,
    #[serde(rename = "resetToken")]
    pub reset_token: Option<Value>,
    pub password: Option<Value>,
    pub password_confirmation: Option<Value>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Serialize)]
pub struct DataResponse {
    pub data: String,
}

pub async fn register(
    State(state): State<SharedState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let mut errors = ValidationErrors::new();

    let name = errors.required_string("name", req.name.as_ref());
    if let Some(name) = name {
        errors.length_between("name", name, 3, 255);
    }

    let email = errors.required_string("email", req.email.as_ref());
    if let Some(email) = email {
        errors.email("email", email);
    }

    let plaintext = errors.required_string("password", req.password.as_ref());
    if let Some(plaintext) = plaintext {
        errors.password("password", plaintext);
    }

    let (Some(name), Some(email), Some(plaintext)) = (name, email, plaintext) else {
        return Err(errors.into());
    };
    errors.into_result()?;

    if db::users::email_exists(&state.pool, email).await? {
        return Err(email_taken());
    }

    let role = db::roles::find_by_name(&state.pool, DEFAULT_ROLE)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Role '{DEFAULT_ROLE}' is not seeded")))?;

    let pw_hash = password::hash(plaintext).map_err(AppError::Internal)?;

    let user = db::users::create(&state.pool, name, email, &pw_hash, role.id)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => email_taken(),
            _ => AppError::Database(e),
        })?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(ApiResponse::ok("User created successfully", user)))
}

fn email_taken() -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add("email", "The email has already been taken.");
    errors.into()
}

pub async fn login(
    State(state): State<SharedState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, AppError> {
    let mut errors = ValidationErrors::new();

    let email = errors.required_string("email", req.email.as_ref());
    if let Some(email) = email {
        errors.email("email", email);
    }
    let plaintext = errors.required_string("password", req.password.as_ref());
    if let Some(plaintext) = plaintext {
        errors.password("password", plaintext);
    }

    let (Some(email), Some(plaintext)) = (email, plaintext) else {
        return Err(errors.into());
    };
    errors.into_result()?;

    if state.login_limiter.check(email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(user) = db::users::find_by_email(&state.pool, email).await? else {
        state.login_limiter.record_failure(email);
        return Ok(invalid_credentials());
    };

    let valid = password::verify(plaintext, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(email);
        return Ok(invalid_credentials());
    }
    state.login_limiter.reset(email);

    let claims = Claims::new(user.id, state.config.jwt_ttl_minutes);
    let token = encode_token(&claims, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(format!("Could not create token: {e}")))?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        success: true,
        token,
    })
    .into_response())
}

fn invalid_credentials() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(BAD_CREDENTIALS)),
    )
        .into_response()
}

pub async fn send_reset_link(
    State(state): State<SharedState>,
    AppJson(req): AppJson<ResetLinkRequest>,
) -> Result<Json<DataResponse>, AppError> {
    let user = match req.email.as_ref().and_then(Value::as_str) {
        Some(requested) if !requested.trim().is_empty() => {
            db::users::find_by_email(&state.pool, requested).await?
        }
        _ => None,
    }
    .ok_or_else(|| AppError::NotFound(EMAIL_NOT_FOUND.to_string()))?;

    let reset =
        db::password_resets::find_or_create(&state.pool, &user.email, &reset_token::generate())
            .await?;
    let reset_url = email::reset_url(&state.config.base_url, &reset.token, &user.email);

    match &state.system_mailer {
        Some(mailer) => {
            mailer
                .send_password_reset(&user.email, &reset.token, &reset_url)
                .await
                .map_err(AppError::Internal)?;
        }
        None => {
            tracing::warn!(
                "SMTP not configured. Password reset link for {}: {reset_url}",
                user.email
            );
        }
    }

    tracing::info!(user_id = %user.id, "password reset link issued");

    Ok(Json(DataResponse {
        data: "Reset email is sent successfully, please check your inbox.".to_string(),
    }))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<(StatusCode, Json<DataResponse>), AppError> {
    let mut errors = ValidationErrors::new();

    let email = errors.required_string("email", req.email.as_ref());
    if let Some(email) = email {
        errors.email("email", email);
    }
    let token = errors.required_string("resetToken", req.reset_token.as_ref());
    let new_password = errors.required_string("password", req.password.as_ref());
    if let Some(new_password) = new_password {
        errors.password("password", new_password);
        let confirmation = req.password_confirmation.as_ref().and_then(Value::as_str);
        errors.confirmed("password", new_password, confirmation);
    }

    let (Some(email), Some(token), Some(new_password)) = (email, token, new_password) else {
        return Err(errors.into());
    };
    errors.into_result()?;

    let mut tx = state.pool.begin().await?;

    let stored = db::password_resets::lock_by_email(&mut tx, email).await?;
    if !stored.is_some_and(|reset| reset_token::matches(&reset.token, token)) {
        return Err(AppError::Unprocessable(BAD_RESET_PAIR.to_string()));
    }

    let pw_hash = password::hash(new_password).map_err(AppError::Internal)?;

    let updated = db::users::update_password_by_email(&mut *tx, email, &pw_hash).await?;
    if updated == 0 {
        return Err(AppError::Unprocessable(BAD_RESET_PAIR.to_string()));
    }

    db::password_resets::delete_by_email(&mut *tx, email).await?;
    tx.commit().await?;

    state.login_limiter.reset(email);
    tracing::info!("password reset completed for {email}");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: "Password has been updated.".to_string(),
        }),
    ))
}
