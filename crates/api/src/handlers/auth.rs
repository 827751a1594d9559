//! Authentication handlers: signup, login, token refresh, logout, and
//! password change.
//!
//! Access tokens are short-lived JWTs; refresh tokens are opaque, stored
//! hashed, and rotated on every refresh.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use ducki_core::error::CoreError;
use ducki_db::models::session::CreateSession;
use ducki_db::models::user::{CreateUser, User};
use ducki_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Token pair returned by signup, login, and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

/// Issue an access/refresh token pair for `user` and persist the session.
async fn issue_tokens(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign access token: {e}")))?;

    let (refresh_token, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + Duration::days(jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        user,
    })
}

/// `POST /api/v1/auth/signup` -- create an account and its profile row.
///
/// A duplicate email surfaces as 409 via the `uq_users_email` constraint.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::Validation("A valid email address is required".into()).into());
    }

    validate_password_strength(&req.password).map_err(CoreError::Validation)?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;

    let user = UserRepo::create_with_profile(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            full_name: req.full_name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "New user signed up");

    let response = issue_tokens(&state, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /api/v1/auth/login` -- verify credentials and issue tokens.
///
/// A missing account and a wrong password produce the same 401 so the
/// endpoint does not leak which emails exist.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = req.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid email or password".into()))?;

    let verified = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {e}")))?;
    if !verified {
        return Err(CoreError::Unauthorized("Invalid email or password".into()).into());
    }

    tracing::info!(user_id = user.id, "User logged in");

    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// `POST /api/v1/auth/refresh` -- rotate a refresh token.
///
/// The presented token's session is revoked and a fresh pair is issued, so a
/// replayed refresh token is rejected.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&req.refresh_token);

    let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid or expired refresh token".into()))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid or expired refresh token".into()))?;

    // Rotation: the old session dies with this request.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// `POST /api/v1/auth/logout` -- revoke every session of the caller.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/v1/auth/password` -- change the caller's password.
///
/// Requires the current password; all sessions are revoked afterwards so
/// stolen refresh tokens stop working.
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<Value>> {
    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        })?;

    let verified = verify_password(&req.current_password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {e}")))?;
    if !verified {
        return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
    }

    validate_password_strength(&req.new_password).map_err(CoreError::Validation)?;

    let new_hash = hash_password(&req.new_password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;
    UserRepo::update_password(&state.pool, account.id, &new_hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, account.id).await?;

    tracing::info!(user_id = account.id, "Password changed, sessions revoked");

    Ok(Json(json!({ "message": "Password updated" })))
}
