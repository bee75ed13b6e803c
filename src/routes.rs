//! Route table.
//!
//! Every user route is a pipeline of two stages: the validation gate built
//! from the route's rule list, then the handler. The gate runs as a route
//! layer, after routing, so it sees the captured path parameters.
//!
//! | Method | Path               | Rules                                         |
//! |--------|--------------------|-----------------------------------------------|
//! | POST   | `/register`        | username non-empty, email, password ≥ 6 chars |
//! | POST   | `/login`           | email, password non-empty                     |
//! | POST   | `/setAvatar/{id}`  | id non-empty, avatar non-empty                |
//! | POST   | `/deleteUsers`     | userIds array with ≥ 1 element                |
//! | GET    | `/transaction/{id}`| id non-empty                                  |

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{MethodRouter, get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{health, users},
    middleware::validate::validate,
    state::AppState,
    validation::{FieldRule, ValidationGate},
};

pub const REGISTER_RULES: [FieldRule; 3] = [
    FieldRule::body("username")
        .not_empty()
        .with_message("Username is required"),
    FieldRule::body("email").is_email().with_message("Invalid email"),
    FieldRule::body("password")
        .min_length(6)
        .with_message("Password must be at least 6 characters long"),
];

pub const LOGIN_RULES: [FieldRule; 2] = [
    FieldRule::body("email").is_email().with_message("Invalid email"),
    FieldRule::body("password")
        .not_empty()
        .with_message("Password is required"),
];

pub const SET_AVATAR_RULES: [FieldRule; 2] = [
    FieldRule::param("id")
        .not_empty()
        .with_message("User ID is required"),
    FieldRule::body("avatar")
        .not_empty()
        .with_message("Avatar URL is required"),
];

pub const DELETE_USERS_RULES: [FieldRule; 1] = [FieldRule::body("userIds")
    .is_array(1)
    .with_message("At least one user ID is required")];

pub const TRANSACTION_RULES: [FieldRule; 1] = [FieldRule::param("id")
    .not_empty()
    .with_message("Transaction ID is required")];

/// Put `gate` in front of the handlers of `route`. Requests with an
/// unsupported method still get the plain 405.
fn gated(route: MethodRouter<AppState>, gate: ValidationGate) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(gate, validate))
}

/// Build the user routes.
///
/// Routes with an `{id}` segment are also bound at their empty-id form
/// (`/setAvatar/`, `/transaction/`) behind the same gate, so a blank id is
/// answered with the "ID is required" error instead of a 404.
pub fn user_router(state: AppState) -> Router {
    let set_avatar = ValidationGate::new(SET_AVATAR_RULES);
    let transaction = ValidationGate::new(TRANSACTION_RULES);

    Router::new()
        .route(
            "/register",
            gated(post(users::register), ValidationGate::new(REGISTER_RULES)),
        )
        .route(
            "/login",
            gated(post(users::login), ValidationGate::new(LOGIN_RULES)),
        )
        .route(
            "/setAvatar/{id}",
            gated(post(users::set_avatar), set_avatar.clone()),
        )
        .route("/setAvatar/", gated(post(users::set_avatar), set_avatar))
        .route(
            "/deleteUsers",
            gated(
                post(users::delete_users),
                ValidationGate::new(DELETE_USERS_RULES),
            ),
        )
        .route(
            "/transaction/{id}",
            gated(get(users::transaction_detail), transaction.clone()),
        )
        .route(
            "/transaction/",
            gated(get(users::transaction_detail), transaction),
        )
        .with_state(state)
}

/// Build the full application: health check, user routes, request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(user_router(state))
        .layer(TraceLayer::new_for_http())
}
