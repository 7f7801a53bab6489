use serde::{Deserialize, Serialize};

use crate::dtos::workout::WorkoutResponse;

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub total_workouts: i64,
    pub completed_workouts: i64,
    pub total_volume_kg: f64,
    pub avg_workouts_per_week: f64,
    pub most_used_exercise: String,
    pub workouts: Vec<WorkoutResponse>,
}
