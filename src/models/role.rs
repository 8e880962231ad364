use serde::Serialize;

/// Role assigned to newly registered users.
pub const DEFAULT_ROLE: &str = "admin";

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UserRole {
    pub id: i32,
    pub name: String,
}
