pub mod auth;
pub mod data;
pub mod users;

use axum::Json;

use crate::types::MessageResponse;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the datagen backend!"))
}
