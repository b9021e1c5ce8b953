//! Bearer-token authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::UserService;
use crate::domain::User;
use crate::interfaces::http::common::ApiError;

/// State for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    pub user_service: Arc<UserService>,
}

/// The user a verified token was issued for, inserted into request extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.trim_start().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

/// Verify `Authorization: Bearer <jwt>`, load the user and attach it to the request.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return ApiError::unauthorized("Authorization token required").into_response();
    };

    let Some(token) = extract_token(auth_header).map(String::from) else {
        return ApiError::unauthorized("Request is not authorized").into_response();
    };

    match auth_state.user_service.authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedUser { user });
            next.run(request).await
        }
        Err(e) => ApiError::from_domain(e, "Failed to authenticate request").into_response(),
    }
}
