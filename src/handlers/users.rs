use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{usage::UsageLogOut, users::UserOut},
    state::AppState,
    types::MessageResponse,
};

pub async fn read_me(CurrentUser(user): CurrentUser) -> Json<UserOut> {
    Json(user.into())
}

pub async fn read_usage(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<UsageLogOut>>, AppError> {
    let logs = state.users.usage_for_user(user.id).await?;
    Ok(Json(logs.into_iter().map(UsageLogOut::from).collect()))
}

pub async fn archive_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    set_archived(&state, user.id, session_id, true).await?;
    Ok(Json(MessageResponse::new("Session archived successfully")))
}

pub async fn unarchive_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    set_archived(&state, user.id, session_id, false).await?;
    Ok(Json(MessageResponse::new("Session unarchived successfully")))
}

async fn set_archived(
    state: &AppState,
    user_id: i32,
    session_id: Uuid,
    archived: bool,
) -> Result<(), AppError> {
    if state.users.set_archived(user_id, session_id, archived).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Session not found".into()))
    }
}
