use axum::{extract::State, Json};
use crate::dtos::exercise::ExerciseResponse;
use crate::models::exercise::Exercise;
use crate::state::AppState;
use crate::error::AppError;
use tracing::{error, instrument};

// GET /exercises - full catalog, category then name
#[instrument(skip(state))]
pub async fn list_exercises(State(state): State<AppState>) -> Result<Json<Vec<ExerciseResponse>>, AppError> {
    match sqlx::query_as::<_, Exercise>(
        "SELECT id, name, description, category, muscle_group
         FROM exercises ORDER BY category, name"
    )
        .fetch_all(&state.db_pool)
        .await {
        Ok(exercises) => {
            let response = exercises.into_iter().map(ExerciseResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch exercises");
            Err(e.into())
        }
    }
}
