//! Error handling module
//!
//! Failures of the remote service never reach this type: views turn them
//! into notices or failed states. What is left is the console's own
//! breakage, rendered as a bare HTML page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Web shell error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Template(e) => error!("Template error: {:?}", e),
            AppError::Internal(msg) => error!("Internal error: {}", msg),
        }

        // Plain body, independent of the template engine
        let body = Html(
            "<!doctype html><html><head><title>Command Center Error</title></head>\
             <body><h1>⚠️ Something went wrong</h1>\
             <p>The console could not render this page.</p>\
             <p><a href=\"/\">Back to Home</a></p></body></html>",
        );

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type alias for page handlers
pub type PageResult<T> = Result<T, AppError>;
