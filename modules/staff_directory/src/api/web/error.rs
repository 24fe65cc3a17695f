use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::domain::error::DomainError;

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html><html><head><title>Not Found</title></head><body><h1>Not Found</h1><p>The requested page does not exist.</p></body></html>";
const SERVER_ERROR_PAGE: &str = "<!DOCTYPE html><html><head><title>Error</title></head><body><h1>Internal Server Error</h1><p>Something went wrong. Please try again later.</p></body></html>";

/// Terminal errors of a web request. Validation and login failures are not
/// errors here; handlers re-render the form for those.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("not found")]
    NotFound,
    #[error("template rendering failed")]
    Template(#[from] tera::Error),
    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for WebError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::EmployeeNotFound { .. } => WebError::NotFound,
            other => WebError::Domain(other),
        }
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::Template(_) | WebError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
            WebError::Template(e) => {
                tracing::error!(error = ?e, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
            }
            WebError::Domain(e) => {
                // Log the internal error details but don't expose them to the client
                tracing::error!(error = %e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
            }
        }
    }
}
