use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outstanding reset token. At most one row per email.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PasswordReset {
    pub email: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub created_at: DateTime<Utc>,
}
