use serde::{Deserialize, Serialize};

use crate::models::exercise::Exercise;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub muscle_group: String,
}

impl From<Exercise> for ExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            description: exercise.description,
            category: exercise.category,
            muscle_group: exercise.muscle_group,
        }
    }
}
