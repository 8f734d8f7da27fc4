use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use log::debug;

use super::AuthError;
use crate::error::AppError;
use crate::models::users::User;
use crate::state::AppState;

/// The account behind the request's bearer token. Rejects with 401 when the
/// header is missing, the token is invalid, or the account is gone.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let claims = state.tokens.verify(bearer.token()).map_err(|e| {
            debug!("Auth - token verification failed: {e}");
            e
        })?;

        let user = state
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::TokenVerification(format!("unknown subject {}", claims.sub)))?;

        if !user.is_active {
            return Err(AuthError::InactiveUser.into());
        }

        debug!("Auth - token verified for user: {}", user.id);
        Ok(CurrentUser(user))
    }
}
