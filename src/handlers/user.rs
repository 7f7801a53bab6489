use crate::auth::jwt::sign_token;
use crate::auth::password::{hash_password, verify_password};
use crate::dtos::user::{RegisterRequest, UserResponse, LoginRequest, AuthResponse};
use crate::error::{map_constraint_violation, AppError};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthContext;
use crate::models::user::User;
use crate::state::AppState;
use axum::extract::Extension;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";

#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name is required"));
    }
    let email = payload.email.trim().to_lowercase();

    if find_by_email(&state.db_pool, &email).await?.is_some() {
        return Err(AppError::conflict("email already registered"));
    }

    let cost = state.config.bcrypt_cost;
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Hash task failed: {e}")))??;

    // The unique index still catches a concurrent registration that slipped past the lookup.
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, password_hash, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(name)
    .bind(&email)
    .bind(&password_hash)
    .bind(Utc::now())
    .fetch_one(&state.db_pool)
    .await
    .map_err(|e| map_constraint_violation(e, "email already registered", "invalid user reference"))?;

    let token = sign_token(user.id, &user.email, &state.config.jwt_secret, state.config.jwt_ttl_hours)?;
    tracing::info!(user_id = user.id, "Registered user");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { token, user: UserResponse::from(user) }),
    ))
}

#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password share one message.
    let user = find_by_email(&state.db_pool, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

    let password = payload.password;
    let password_hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Verify task failed: {e}")))?;

    if !ok {
        return Err(AppError::unauthorized("invalid credentials"));
    }

    let token = sign_token(user.id, &user.email, &state.config.jwt_secret, state.config.jwt_ttl_hours)?;

    Ok(Json(AuthResponse { token, user: UserResponse::from(user) }))
}

// Returns the profile for the id carried in the token; the row may have been deleted since.
#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(auth.user_id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;

    Ok(Json(UserResponse::from(user)))
}

async fn find_by_email(db_pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(db_pool)
        .await?;
    Ok(user)
}
