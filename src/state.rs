//! Shared application state.

use std::sync::Arc;

use crate::services::controllers::UserControllers;

/// State handed to every user handler via `State` extraction.
#[derive(Clone)]
pub struct AppState {
    pub controllers: Arc<dyn UserControllers>,
}

impl AppState {
    pub fn new(controllers: Arc<dyn UserControllers>) -> Self {
        Self { controllers }
    }
}
