use axum::{extract::State, http::StatusCode, Form, Json};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    auth::{hash_password, verify_password, AuthError},
    error::AppError,
    models::users::UserCreate,
    state::AppState,
    types::{CheckEmail, CheckUsername, ExistsResponse, LoginForm, MessageResponse, TokenResponse},
};

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    if !EMAIL.is_match(&payload.email) {
        return Err(AppError::Validation("value is not a valid email address".into()));
    }

    if state.users.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::BadRequest("Username already registered".into()));
    }
    if state.users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }
    if payload.password != payload.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }

    let hashed_password = hash_password(&payload.password)?;
    let user = state
        .users
        .create_user(payload.into_new_user(hashed_password))
        .await?;

    info!("Registered user {} ({})", user.id, user.username);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Attempting login for: {}", form.username);

    let user = state
        .users
        .find_by_email(&form.username)
        .await?
        .filter(|user| verify_password(&form.password, &user.hashed_password))
        .ok_or(AuthError::InvalidCredentials)?;

    let token = state.tokens.issue(&user)?;
    info!("Login successful for user {}", user.id);
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn check_username(
    State(state): State<AppState>,
    Json(payload): Json<CheckUsername>,
) -> Result<Json<ExistsResponse>, AppError> {
    let exists = state.users.find_by_username(&payload.username).await?.is_some();
    Ok(Json(ExistsResponse { exists }))
}

pub async fn check_email(
    State(state): State<AppState>,
    Json(payload): Json<CheckEmail>,
) -> Result<Json<ExistsResponse>, AppError> {
    if !EMAIL.is_match(&payload.email) {
        return Err(AppError::Validation("value is not a valid email address".into()));
    }
    let exists = state.users.find_by_email(&payload.email).await?.is_some();
    Ok(Json(ExistsResponse { exists }))
}
