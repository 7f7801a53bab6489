use axum::{extract::State, Json};

use crate::dtos::config::ClientConfigResponse;
use crate::state::AppState;

// GET /api/config - only reachable with a valid token
pub async fn get_client_config(State(state): State<AppState>) -> Json<ClientConfigResponse> {
    let groq_key = state.config.groq_api_key.clone().unwrap_or_default();
    Json(ClientConfigResponse {
        groq_key_set: !groq_key.is_empty(),
        groq_key,
    })
}
