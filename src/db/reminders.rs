use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Reminder, ReminderStatus};

pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        "SELECT * FROM reminders WHERE user_id = $1 ORDER BY date_of_origin ASC, created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    description: &str,
    date_of_origin: NaiveDate,
    status: ReminderStatus,
) -> Result<Reminder, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        "INSERT INTO reminders (user_id, description, date_of_origin, status)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(user_id)
    .bind(description)
    .bind(date_of_origin)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>("SELECT * FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    description: &str,
    date_of_origin: NaiveDate,
    status: ReminderStatus,
) -> Result<Option<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        "UPDATE reminders
         SET description = $3, date_of_origin = $4, status = $5, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(description)
    .bind(date_of_origin)
    .bind(status)
    .fetch_optional(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    status: ReminderStatus,
) -> Result<Option<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        "UPDATE reminders SET status = $3, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(status)
    .fetch_optional(pool)
    .await
}

/// Reminders whose day-of-month and month are both on or after `today`'s.
/// Years are not compared.
pub async fn list_upcoming(
    pool: &PgPool,
    user_id: Uuid,
    today: NaiveDate,
) -> Result<Vec<Reminder>, sqlx::Error> {
    let (day, month) = day_month(today);
    sqlx::query_as::<_, Reminder>(
        "SELECT * FROM reminders
         WHERE user_id = $1
           AND EXTRACT(DAY FROM date_of_origin)::int >= $2
           AND EXTRACT(MONTH FROM date_of_origin)::int >= $3
         ORDER BY date_of_origin ASC",
    )
    .bind(user_id)
    .bind(day)
    .bind(month)
    .fetch_all(pool)
    .await
}

/// Reminders falling on the same day and month as `date`, in any year.
pub async fn list_for_date(
    pool: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<Reminder>, sqlx::Error> {
    let (day, month) = day_month(date);
    sqlx::query_as::<_, Reminder>(
        "SELECT * FROM reminders
         WHERE user_id = $1
           AND EXTRACT(DAY FROM date_of_origin)::int = $2
           AND EXTRACT(MONTH FROM date_of_origin)::int = $3
         ORDER BY date_of_origin ASC",
    )
    .bind(user_id)
    .bind(day)
    .bind(month)
    .fetch_all(pool)
    .await
}

pub async fn list_by_status(
    pool: &PgPool,
    user_id: Uuid,
    status: ReminderStatus,
) -> Result<Vec<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        "SELECT * FROM reminders WHERE user_id = $1 AND status = $2
         ORDER BY date_of_origin ASC",
    )
    .bind(user_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Deletes reminders on the same day and month as `date`, in any year.
pub async fn delete_for_date(
    pool: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<u64, sqlx::Error> {
    let (day, month) = day_month(date);
    let result = sqlx::query(
        "DELETE FROM reminders
         WHERE user_id = $1
           AND EXTRACT(DAY FROM date_of_origin)::int = $2
           AND EXTRACT(MONTH FROM date_of_origin)::int = $3",
    )
    .bind(user_id)
    .bind(day)
    .bind(month)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_status(
    pool: &PgPool,
    user_id: Uuid,
    status: ReminderStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reminders WHERE user_id = $1 AND status = $2")
        .bind(user_id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

fn day_month(date: NaiveDate) -> (i32, i32) {
    (date.day() as i32, date.month() as i32)
}
