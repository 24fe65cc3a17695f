//! Request extractors for the session guard.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::web::cookies::{cookie_value, SESSION_COOKIE};
use crate::api::web::state::WebState;

/// Authenticated caller, resolved from the session cookie.
///
/// Anonymous requests are rejected with a redirect to the login page before
/// the handler (or any body extractor) runs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i32,
    pub token: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(web) = parts.extensions.get::<Arc<WebState>>() else {
            tracing::error!("WebState extension missing");
            return Err(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        };

        let token = cookie_value(&parts.headers, SESSION_COOKIE)
            .ok_or_else(|| Redirect::to("/").into_response())?;
        let user_id = web.auth.resolve(&token).ok_or_else(|| {
            tracing::debug!("Session token unknown or expired");
            Redirect::to("/").into_response()
        })?;

        Ok(CurrentUser { user_id, token })
    }
}
