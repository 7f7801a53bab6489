use chrono::{Utc, Duration};
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn sign_token(user_id: i64, email: &str, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = Duration::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::internal(format!("Token lifetime out of range: {ttl_hours}h")))?;
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256)
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {e}")))
}
