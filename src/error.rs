use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::database::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, AuthError::InvalidCredentials.to_string())
            }
            AppError::Auth(AuthError::MissingToken) => {
                (StatusCode::UNAUTHORIZED, AuthError::MissingToken.to_string())
            }
            AppError::Auth(AuthError::InactiveUser) => {
                (StatusCode::BAD_REQUEST, AuthError::InactiveUser.to_string())
            }
            AppError::Auth(AuthError::TokenVerification(_)) => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
            AppError::Auth(AuthError::TokenCreation(_) | AuthError::Hashing(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AppError::Store(StoreError::Conflict(field)) => {
                (StatusCode::BAD_REQUEST, format!("{field} already registered"))
            }
            AppError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();

        if status.is_server_error() {
            error!("Request failed: {self}");
        }

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_bad_request() {
        let response = AppError::from(StoreError::Conflict("Email")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = AppError::from(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::from(StoreError::Pool("timed out".into()));
        let (status, detail) = err.status_and_detail();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!detail.contains("timed out"));
    }
}
