use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::TokenService;
use crate::database::UserStore;
use crate::llm::LanguageModel;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub model: Arc<dyn LanguageModel>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        model: Arc<dyn LanguageModel>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            model,
            tokens,
        }
    }
}
