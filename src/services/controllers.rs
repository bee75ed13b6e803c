//! Business collaborators behind the user routes.
//!
//! Handlers only call this trait. What registering, logging in, or deleting
//! a user actually means is decided by the implementation.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        response::ControllerResponse,
        user::{DeleteUsersRequest, LoginRequest, RegisterRequest, SetAvatarRequest},
    },
};

/// Business logic for the user routes.
///
/// Each method is called at most once per request, and only after the
/// request passed its validation gate.
#[async_trait]
pub trait UserControllers: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<ControllerResponse, AppError>;

    async fn login(&self, request: LoginRequest) -> Result<ControllerResponse, AppError>;

    async fn set_avatar(
        &self,
        user_id: String,
        request: SetAvatarRequest,
    ) -> Result<ControllerResponse, AppError>;

    async fn delete_users(
        &self,
        request: DeleteUsersRequest,
    ) -> Result<ControllerResponse, AppError>;

    async fn transaction_detail(
        &self,
        transaction_id: String,
    ) -> Result<ControllerResponse, AppError>;
}
