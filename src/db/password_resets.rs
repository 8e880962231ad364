use sqlx::{PgPool, Postgres, Transaction};

use crate::models::PasswordReset;

/// Inserts `candidate` for `email` unless a token is already outstanding, and
/// returns whichever token is stored. The primary key on `email` makes this
/// safe under concurrent requests.
pub async fn find_or_create(
    pool: &PgPool,
    email: &str,
    candidate: &str,
) -> Result<PasswordReset, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO password_resets (email, token) VALUES ($1, $2)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(email)
    .bind(candidate)
    .execute(&mut *tx)
    .await?;

    let stored = sqlx::query_as::<_, PasswordReset>(
        "SELECT * FROM password_resets WHERE email = $1",
    )
    .bind(email)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(stored)
}

pub async fn find_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<PasswordReset>, sqlx::Error> {
    sqlx::query_as::<_, PasswordReset>("SELECT * FROM password_resets WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Row-locks the outstanding token for `email` until the transaction ends.
pub async fn lock_by_email(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
) -> Result<Option<PasswordReset>, sqlx::Error> {
    sqlx::query_as::<_, PasswordReset>(
        "SELECT * FROM password_resets WHERE email = $1 FOR UPDATE",
    )
    .bind(email)
    .fetch_optional(&mut **tx)
    .await
}

pub async fn delete_by_email<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM password_resets WHERE email = $1")
        .bind(email)
        .execute(executor)
        .await?;
    Ok(())
}
