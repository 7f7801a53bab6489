use axum::extract::{Extension, State};
use axum::Json;
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::instrument;

use crate::dtos::report::ReportResponse;
use crate::dtos::workout::WorkoutStatus;
use crate::error::AppError;
use crate::handlers::workout::list_workouts_for;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 60.0 * 60.0;

// GET /workouts/report
#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn get_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ReportResponse>, AppError> {
    // One read transaction so every aggregate sees the same snapshot.
    let mut tx = state.db_pool.begin().await?;
    let report = build_report(&mut tx, auth.user_id, Utc::now()).await?;
    tx.commit().await?;

    Ok(Json(report))
}

pub(crate) async fn build_report(
    conn: &mut SqliteConnection,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<ReportResponse, AppError> {
    let total_workouts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

    let completed_workouts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE user_id = ? AND status = ?")
            .bind(user_id)
            .bind(WorkoutStatus::Completed.as_str())
            .fetch_one(&mut *conn)
            .await?;

    // Volume only counts entries of completed workouts.
    let total_volume_kg: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(we.sets * we.reps * we.weight_kg), 0.0)
         FROM workout_exercises we
         JOIN workouts w ON w.id = we.workout_id
         WHERE w.user_id = ? AND w.status = ?",
    )
    .bind(user_id)
    .bind(WorkoutStatus::Completed.as_str())
    .fetch_one(&mut *conn)
    .await?;

    let first_created: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT MIN(created_at) FROM workouts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

    let avg_workouts_per_week = match first_created {
        Some(first) if total_workouts > 0 => average_per_week(total_workouts, first, now),
        _ => 0.0,
    };

    // Ties go to the lowest exercise id.
    let most_used_exercise: Option<String> = sqlx::query_scalar(
        "SELECT e.name
         FROM workout_exercises we
         JOIN exercises e ON e.id = we.exercise_id
         JOIN workouts w ON w.id = we.workout_id
         WHERE w.user_id = ?
         GROUP BY we.exercise_id, e.name
         ORDER BY COUNT(*) DESC, we.exercise_id ASC
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    let workouts = list_workouts_for(conn, user_id, Some(WorkoutStatus::Completed)).await?;

    Ok(ReportResponse {
        total_workouts,
        completed_workouts,
        total_volume_kg,
        avg_workouts_per_week,
        most_used_exercise: most_used_exercise.unwrap_or_default(),
        workouts,
    })
}

/// Workouts per week since `first`, with the span floored at one week.
fn average_per_week(total: i64, first: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let weeks = ((now - first).num_seconds() as f64 / SECONDS_PER_WEEK).max(1.0);
    total as f64 / weeks
}
