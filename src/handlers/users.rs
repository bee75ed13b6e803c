//! User HTTP handlers.
//!
//! This module implements the user-related API endpoints:
//! - POST /register - Register a new user
//! - POST /login - Log in
//! - POST /setAvatar/:id - Set a user's avatar
//! - POST /deleteUsers - Delete several users
//! - GET /transaction/:id - Get transaction details
//!
//! Every handler here sits behind the validation gate. Handlers pass the
//! accepted body, untouched, to the business collaborator in [`AppState`];
//! nothing is checked a second time.

use axum::{
    Extension,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    middleware::validate::ValidatedBody,
    models::{
        response::ControllerResponse,
        user::{DeleteUsersRequest, LoginRequest, RegisterRequest, SetAvatarRequest},
    },
    state::AppState,
};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "hunter22"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    Extension(ValidatedBody(body)): Extension<ValidatedBody>,
) -> Result<ControllerResponse, AppError> {
    let request = RegisterRequest::new(body);
    tracing::info!("Dispatching registration");

    state.controllers.register(request).await
}

/// Log in with email and password.
pub async fn login(
    State(state): State<AppState>,
    Extension(ValidatedBody(body)): Extension<ValidatedBody>,
) -> Result<ControllerResponse, AppError> {
    let request = LoginRequest::new(body);

    state.controllers.login(request).await
}

/// Set the avatar of user `id`.
///
/// # URL Parameters
///
/// - `id` - user identifier, passed through untouched
pub async fn set_avatar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(ValidatedBody(body)): Extension<ValidatedBody>,
) -> Result<ControllerResponse, AppError> {
    let request = SetAvatarRequest::new(body);

    state.controllers.set_avatar(user_id, request).await
}

/// Delete every user listed in `userIds`.
pub async fn delete_users(
    State(state): State<AppState>,
    Extension(ValidatedBody(body)): Extension<ValidatedBody>,
) -> Result<ControllerResponse, AppError> {
    let request = DeleteUsersRequest::new(body);
    tracing::info!("Dispatching deletion of {} user(s)", request.user_ids().len());

    state.controllers.delete_users(request).await
}

/// Get transaction `id`.
pub async fn transaction_detail(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<ControllerResponse, AppError> {
    state.controllers.transaction_detail(transaction_id).await
}
