//! Registration and login endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use shelf_core::{User, ValidationError};
use shelf_db::repository::user::generate_user_id;

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub username: String,
    pub password: String,
}

/// Issued on successful registration or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: String,
    pub username: String,
}

/// POST /api/auth/register/
///
/// Creates an account and returns a token for immediate use.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsPayload>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        }
        .into());
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        }
        .into());
    }

    let user = User {
        id: generate_user_id(),
        username: username.to_string(),
        password_hash: hash_password(&payload.password)?,
        is_active: true,
        created_at: Utc::now(),
    };

    // Duplicate usernames surface as 409 via the unique index
    let inserted = state.db.users().insert(&user).await?;
    tracing::info!(user_id = %inserted.id, username = %inserted.username, "User registered");

    let token = state.jwt.generate_token(&inserted.id, &inserted.username)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            user_id: inserted.id,
            username: inserted.username,
        }),
    ))
}

/// POST /api/auth/login/
///
/// Unknown usernames and wrong passwords get the same 401, so callers
/// cannot probe which usernames exist.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsPayload>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .db
        .users()
        .get_by_username(payload.username.trim())
        .await?
        .ok_or_else(|| ApiError::AuthFailed("Invalid username or password".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(ApiError::AuthFailed(
            "Invalid username or password".to_string(),
        ));
    }

    if !user.is_active {
        return Err(ApiError::Forbidden("Account is deactivated".to_string()));
    }

    let token = state.jwt.generate_token(&user.id, &user.username)?;
    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(TokenResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}
