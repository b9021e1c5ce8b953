//! User API handlers
//!
//! Thin wrappers over `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{AuthResponse, LoginRequest, SignupRequest, UserProfileDto};
use crate::application::UserService;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/api/users/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Missing or invalid fields, or email taken", body = ErrorBody),
        (status = 500, description = "Failed to signup user", body = ErrorBody)
    )
)]
pub async fn signup(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let result = state
        .user_service
        .signup(request.into())
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to signup user"))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            email: result.user.email,
            token: result.token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Email or password missing", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let result = state
        .user_service
        .login(request.email, request.password)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to login user"))?;

    Ok(Json(AuthResponse {
        email: result.user.email,
        token: result.token,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user's profile", body = UserProfileDto),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    )
)]
pub async fn me(Extension(auth): Extension<AuthenticatedUser>) -> Json<UserProfileDto> {
    Json(UserProfileDto::from(auth.user))
}
