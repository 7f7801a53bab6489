use std::collections::HashMap;

use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::SqliteConnection;
use tracing::instrument;

use crate::dtos::workout::{
    CreateWorkoutRequest, ListWorkoutsQuery, UpdateWorkoutRequest, WorkoutExerciseRequest,
    WorkoutResponse, WorkoutStatus,
};
use crate::error::AppError;
use crate::extract::{IdPath, QueryParams, ValidatedJson};
use crate::middleware::auth::AuthContext;
use crate::models::workout::{Workout, WorkoutExerciseRow};
use crate::state::AppState;

const WORKOUT_COLUMNS: &str =
    "id, user_id, title, description, comment, status, scheduled_at, completed_at, created_at, updated_at";

const ENTRY_SELECT: &str = r#"
    SELECT we.id, we.workout_id, we.exercise_id, we.sets, we.reps, we.weight_kg, we.duration_sec, we.notes,
           e.name AS exercise_name,
           e.description AS exercise_description,
           e.category AS exercise_category,
           e.muscle_group AS exercise_muscle_group
    FROM workout_exercises we
    JOIN exercises e ON e.id = we.exercise_id
"#;

// POST /workouts
#[instrument(skip(state, auth, req), fields(user_id = auth.user_id))]
pub async fn create_workout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutResponse>), AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("title is required"));
    }

    let mut tx = state.db_pool.begin_with("BEGIN IMMEDIATE").await?;
    let now = Utc::now();

    let workout_id: i64 = sqlx::query_scalar(
        "INSERT INTO workouts (user_id, title, description, status, scheduled_at, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(auth.user_id)
    .bind(title)
    .bind(&req.description)
    .bind(WorkoutStatus::Pending.as_str())
    .bind(req.scheduled_at)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::not_found("user not found"),
        other => other.into(),
    })?;

    insert_entries(&mut tx, workout_id, &req.exercises).await?;

    let workout = fetch_workout(&mut tx, auth.user_id, workout_id)
        .await?
        .ok_or_else(|| AppError::internal("created workout vanished inside its transaction"))?;

    tx.commit().await?;
    tracing::info!(workout_id, entries = workout.exercises.len(), "Created workout");

    Ok((StatusCode::CREATED, Json(workout)))
}

// GET /workouts?status=
#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    QueryParams(query): QueryParams<ListWorkoutsQuery>,
) -> Result<Json<Vec<WorkoutResponse>>, AppError> {
    let status = query.status_filter().map_err(AppError::validation)?;

    let mut conn = state.db_pool.acquire().await?;
    let workouts = list_workouts_for(&mut conn, auth.user_id, status).await?;

    Ok(Json(workouts))
}

// GET /workouts/{id}
#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn get_workout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    IdPath(id): IdPath<i64>,
) -> Result<Json<WorkoutResponse>, AppError> {
    let mut conn = state.db_pool.acquire().await?;
    let workout = fetch_workout(&mut conn, auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("workout not found"))?;

    Ok(Json(workout))
}

// PUT /workouts/{id}
#[instrument(skip(state, auth, req), fields(user_id = auth.user_id))]
pub async fn update_workout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    IdPath(id): IdPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateWorkoutRequest>,
) -> Result<Json<WorkoutResponse>, AppError> {
    let title = req.title.as_deref().map(str::trim);
    if title == Some("") {
        return Err(AppError::validation("title cannot be empty"));
    }

    // Write lock first: upgrading a read transaction fails with SQLITE_BUSY under contention.
    let mut tx = state.db_pool.begin_with("BEGIN IMMEDIATE").await?;

    let existing = sqlx::query_as::<_, Workout>(&format!(
        "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ? AND user_id = ?"
    ))
    .bind(id)
    .bind(auth.user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("workout not found"))?;

    let now = Utc::now();
    let completed_at = match req.status {
        Some(WorkoutStatus::Completed) => Some(now),
        Some(_) => None,
        None => existing.completed_at,
    };

    sqlx::query(
        "UPDATE workouts SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            comment = COALESCE(?, comment),
            status = COALESCE(?, status),
            scheduled_at = COALESCE(?, scheduled_at),
            completed_at = ?,
            updated_at = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(title)
    .bind(req.description.as_deref())
    .bind(req.comment.as_deref())
    .bind(req.status.map(|s| s.as_str()))
    .bind(req.scheduled_at)
    .bind(completed_at)
    .bind(now)
    .bind(id)
    .bind(auth.user_id)
    .execute(&mut *tx)
    .await?;

    // A supplied list replaces every existing entry; an absent one leaves them alone.
    if let Some(entries) = &req.exercises {
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_entries(&mut tx, id, entries).await?;
    }

    let workout = fetch_workout(&mut tx, auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("workout not found"))?;

    tx.commit().await?;

    Ok(Json(workout))
}

// DELETE /workouts/{id}
#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn delete_workout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    IdPath(id): IdPath<i64>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(auth.user_id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("workout not found"));
    }

    Ok(Json(json!({ "message": "deleted" })))
}

async fn insert_entries(
    conn: &mut SqliteConnection,
    workout_id: i64,
    entries: &[WorkoutExerciseRequest],
) -> Result<(), AppError> {
    for entry in entries {
        sqlx::query(
            "INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, weight_kg, duration_sec, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(workout_id)
        .bind(entry.exercise_id)
        .bind(entry.sets)
        .bind(entry.reps)
        .bind(entry.weight_kg)
        .bind(entry.duration_sec)
        .bind(&entry.notes)
        .execute(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::validation(format!("exercise {} does not exist", entry.exercise_id))
            }
            other => other.into(),
        })?;
    }
    Ok(())
}

/// Loads one workout with its entries, scoped to its owner.
pub(crate) async fn fetch_workout(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: i64,
) -> Result<Option<WorkoutResponse>, AppError> {
    let workout = sqlx::query_as::<_, Workout>(&format!(
        "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ? AND user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(workout) = workout else {
        return Ok(None);
    };

    let entries = sqlx::query_as::<_, WorkoutExerciseRow>(&format!(
        "{ENTRY_SELECT} WHERE we.workout_id = ? ORDER BY we.id"
    ))
    .bind(workout.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(WorkoutResponse::from_parts(workout, entries)))
}

/// All workouts of `user_id`, earliest scheduled (or created) first.
pub(crate) async fn list_workouts_for(
    conn: &mut SqliteConnection,
    user_id: i64,
    status: Option<WorkoutStatus>,
) -> Result<Vec<WorkoutResponse>, AppError> {
    let workouts = sqlx::query_as::<_, Workout>(&format!(
        "SELECT {WORKOUT_COLUMNS} FROM workouts
         WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2)
         ORDER BY COALESCE(scheduled_at, created_at) ASC, id ASC"
    ))
    .bind(user_id)
    .bind(status.map(|s| s.as_str()))
    .fetch_all(&mut *conn)
    .await?;

    if workouts.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, WorkoutExerciseRow>(&format!(
        "{ENTRY_SELECT}
         JOIN workouts w ON w.id = we.workout_id
         WHERE w.user_id = ?1 AND (?2 IS NULL OR w.status = ?2)
         ORDER BY we.id"
    ))
    .bind(user_id)
    .bind(status.map(|s| s.as_str()))
    .fetch_all(&mut *conn)
    .await?;

    let mut entries_by_workout: HashMap<i64, Vec<WorkoutExerciseRow>> = HashMap::new();
    for row in rows {
        entries_by_workout.entry(row.workout_id).or_default().push(row);
    }

    Ok(workouts
        .into_iter()
        .map(|w| {
            let entries = entries_by_workout.remove(&w.id).unwrap_or_default();
            WorkoutResponse::from_parts(w, entries)
        })
        .collect())
}
