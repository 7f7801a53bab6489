use bcrypt::{hash, verify};

use crate::error::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(format!("Hash error: {e}")))
}

/// A malformed stored hash counts as a mismatch rather than a server error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}
