use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dtos::exercise::ExerciseResponse;
use crate::models::workout::{Workout, WorkoutExerciseRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Pending,
    Active,
    Completed,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Pending => "pending",
            WorkoutStatus::Active => "active",
            WorkoutStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WorkoutStatus::Pending),
            "active" => Ok(WorkoutStatus::Active),
            "completed" => Ok(WorkoutStatus::Completed),
            other => Err(format!("unknown workout status '{other}'")),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutExerciseRequest {
    pub exercise_id: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "sets cannot be negative"))]
    pub sets: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "reps cannot be negative"))]
    pub reps: i64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "weight_kg cannot be negative"))]
    pub weight_kg: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "duration_sec cannot be negative"))]
    pub duration_sec: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<WorkoutExerciseRequest>,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub status: Option<WorkoutStatus>,
    pub scheduled_at: Option<DateTime<Utc>>,
    // Some(vec![]) clears every entry.
    #[validate(nested)]
    pub exercises: Option<Vec<WorkoutExerciseRequest>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListWorkoutsQuery {
    pub status: Option<String>,
}

impl ListWorkoutsQuery {
    /// An empty `status=` means no filter.
    pub fn status_filter(&self) -> Result<Option<WorkoutStatus>, String> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutExerciseResponse {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight_kg: f64,
    pub duration_sec: i64,
    pub notes: String,
    pub exercise: ExerciseResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutResponse {
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
    pub exercises: Vec<WorkoutExerciseResponse>,
}

impl From<WorkoutExerciseRow> for WorkoutExerciseResponse {
    fn from(row: WorkoutExerciseRow) -> Self {
        Self {
            id: row.id,
            workout_id: row.workout_id,
            exercise_id: row.exercise_id,
            sets: row.sets,
            reps: row.reps,
            weight_kg: row.weight_kg,
            duration_sec: row.duration_sec,
            notes: row.notes,
            exercise: ExerciseResponse {
                id: row.exercise_id,
                name: row.exercise_name,
                description: row.exercise_description,
                category: row.exercise_category,
                muscle_group: row.exercise_muscle_group,
            },
        }
    }
}

impl WorkoutResponse {
    pub fn from_parts(workout: Workout, entries: Vec<WorkoutExerciseRow>) -> Self {
        Self {
            id: workout.id,
            user_id: workout.user_id,
            title: workout.title,
            description: workout.description,
            comment: workout.comment,
            status: workout.status,
            scheduled_at: workout.scheduled_at,
            completed_at: workout.completed_at,
            created_at: workout.created_at,
            updated_at: workout.updated_at,
            exercises: entries.into_iter().map(WorkoutExerciseResponse::from).collect(),
        }
    }
}
