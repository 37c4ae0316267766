//! Landing page

use crate::error::PageResult;
use crate::navigation::Route;
use crate::routes::redirect;
use crate::state::SharedState;
use crate::views::HomePage;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use tracing::debug;

pub async fn show(State(state): State<SharedState>) -> PageResult<Html<String>> {
    let html = state
        .templates
        .render("home.html", context! { page => HomePage::default() })?;
    Ok(Html(html))
}

/// Unknown paths land on the home page; near-misses of a known page
/// (such as a trailing slash) are sent to its canonical path
pub async fn fallback(State(state): State<SharedState>, uri: Uri) -> PageResult<Response> {
    match Route::resolve(uri.path()) {
        Route::Home => {
            debug!("No page at {}, showing home", uri.path());
            Ok(show(State(state)).await?.into_response())
        }
        route => redirect(&route, &[]),
    }
}
