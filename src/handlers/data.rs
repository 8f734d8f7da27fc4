use axum::{extract::State, response::sse::Sse, Json};
use log::{info, warn};

use crate::{
    auth::CurrentUser,
    llm::Prompt,
    models::usage::NewUsageLog,
    services::title,
    state::AppState,
    streaming::{spawn_snapshot_stream, SnapshotStream},
    types::{PromptRequest, TitleResponse},
};

/// Streams the generated JSON array back as server-sent events, one complete
/// snapshot per event.
pub async fn generate_ai_stream(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<PromptRequest>,
) -> Sse<SnapshotStream> {
    info!(
        "Starting data generation for user: {} ({} chars)",
        user.id,
        payload.prompt.len()
    );

    if let Err(e) = state
        .users
        .record_usage(NewUsageLog::new(user.id, payload.prompt.clone()))
        .await
    {
        warn!("Failed to record usage for user {}: {e}", user.id);
    }

    let model = state.model.clone();
    let prompt = Prompt::data_generation(&payload.prompt);
    spawn_snapshot_stream(async move { model.stream(&prompt).await })
}

/// Always answers 200; failures inside fall back to a prompt-derived title.
pub async fn generate_title(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<PromptRequest>,
) -> Json<TitleResponse> {
    let title = title::generate_title(state.model.as_ref(), &payload.prompt).await;
    info!("Generated title for user {}: {title}", user.id);
    Json(TitleResponse { title })
}
