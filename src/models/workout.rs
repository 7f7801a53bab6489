use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Workout {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub comment: String,
    pub status: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of a workout joined with its catalog exercise.
#[derive(Debug, FromRow)]
pub struct WorkoutExerciseRow {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight_kg: f64,
    pub duration_sec: i64,
    pub notes: String,
    pub exercise_name: String,
    pub exercise_description: String,
    pub exercise_category: String,
    pub exercise_muscle_group: String,
}
