use sqlx::PgPool;

use crate::models::UserRole;

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<UserRole>, sqlx::Error> {
    sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}
