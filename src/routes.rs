//! Route definitions and router setup
//!
//! Every page request is one view activation: the handler builds the view,
//! runs its effects against the remote service until nothing is pending,
//! and renders the settled state.

mod construction;
mod fleet;
mod home;
mod planets;
mod spacecraft;

use crate::error::{AppError, PageResult};
use crate::flow::{FetchState, Notice, NoticeLevel};
use crate::navigation::Route;
use crate::state::{AppState, SharedState};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{debug, Level};

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState) -> Router {
    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .propagate_x_request_id();

    Router::new()
        // Health check
        .route("/health", get(health_check))

        .route("/", get(home::show))

        // Fleet
        .route("/spacecrafts", get(fleet::list))
        .route("/spacecrafts/{id}/destroy", post(fleet::destroy))

        // Spacecraft detail
        .route("/spacecraft/{id}", get(spacecraft::show))
        .route("/spacecraft/{id}/destroy", post(spacecraft::destroy))

        // Construction
        .route("/construction", get(construction::show).post(construction::build))

        // Planets and transfers
        .route("/planets", get(planets::show))
        .route("/planets/transfer", post(planets::transfer))

        .fallback(home::fallback)

        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "message": "Command center is online.",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Notice carried across a redirect
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NoticeQuery {
    notice: Option<String>,
    level: Option<NoticeLevel>,
}

impl NoticeQuery {
    pub(crate) fn into_notices(self) -> Vec<Notice> {
        match self.notice {
            Some(text) if !text.trim().is_empty() => vec![Notice {
                level: self.level.unwrap_or(NoticeLevel::Success),
                text,
            }],
            _ => Vec::new(),
        }
    }
}

/// Answer given on a confirmation page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Answer {
    /// First submission; the question has not been shown yet
    Unasked,
    Accepted,
    Declined,
}

/// `confirm=yes|no` marks a submission coming from a confirmation page
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Confirmation {
    confirm: Option<String>,
}

impl Confirmation {
    pub(crate) fn answer(&self) -> Answer {
        match self.confirm.as_deref() {
            Some("yes") => Answer::Accepted,
            Some("no") => Answer::Declined,
            _ => Answer::Unasked,
        }
    }
}

/// Hidden field replayed by a confirmation page
#[derive(Debug, Serialize)]
pub(crate) struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

/// Everything a confirmation page needs
pub(crate) struct ConfirmPage<'a> {
    pub title: &'a str,
    pub prompt: String,
    pub action: String,
    pub fields: Vec<HiddenField>,
}

pub(crate) fn render_confirm(state: &AppState, page: ConfirmPage<'_>) -> PageResult<Html<String>> {
    let html = state.templates.render(
        "confirm.html",
        context! {
            title => page.title,
            prompt => page.prompt,
            action => page.action,
            fields => page.fields,
        },
    )?;
    Ok(Html(html))
}

/// Template name for the fetch state of a view
pub(crate) fn state_name<T>(state: &FetchState<T>) -> &'static str {
    match state {
        FetchState::Loading => "loading",
        FetchState::Ready(_) => "ready",
        FetchState::Failed(_) => "failed",
    }
}

/// Title and detail of a failed view, for the error panel
pub(crate) fn failure_of<T>(state: &FetchState<T>) -> Option<minijinja::Value> {
    match state {
        FetchState::Failed(failure) => Some(context! {
            title => failure.title(),
            detail => failure.detail(),
        }),
        _ => None,
    }
}

/// `303 See Other` to `route`, carrying the first notice in the query
pub(crate) fn redirect(route: &Route, notices: &[Notice]) -> PageResult<Response> {
    let mut location = route.path();
    if let Some(notice) = notices.first() {
        let level = match notice.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        };
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("notice", &notice.text)
            .append_pair("level", level)
            .finish();
        location = format!("{}?{}", location, query);
    }
    debug!("Redirecting to {}", location);

    let location = HeaderValue::from_str(&location)
        .map_err(|e| AppError::Internal(format!("Invalid redirect location {}: {}", location, e)))?;
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::fake::FakeApi;
    use crate::render::Templates;
    use crate::state::AppState;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response, StatusCode};
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub fn app(api: Arc<FakeApi>) -> Router {
        let state = AppState::new(api, Templates::new().unwrap());
        super::create_router(Arc::new(state))
    }

    pub async fn get(app: Router, uri: &str) -> Response<Body> {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
        app.oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub fn location(response: &Response<Body>) -> String {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::{redirect, NoticeQuery};
    use crate::api::fake::FakeApi;
    use crate::flow::Notice;
    use crate::navigation::Route;
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_check() {
        let response = get(app(Arc::new(FakeApi::seeded())), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let response = get(app(Arc::new(FakeApi::seeded())), "/health").await;
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn test_redirect_encodes_notice() {
        let response = redirect(&Route::Fleet, &[Notice::success("Ark & Co has been successfully built!")])
            .unwrap();

        assert_eq!(
            location(&response),
            "/spacecrafts?notice=Ark+%26+Co+has+been+successfully+built%21&level=success"
        );
    }

    #[test]
    fn test_redirect_without_notice() {
        let response = redirect(&Route::Planets, &[]).unwrap();
        assert_eq!(location(&response), "/planets");
    }

    #[test]
    fn test_notice_query() {
        let query = NoticeQuery {
            notice: Some("Done".to_string()),
            level: None,
        };
        assert_eq!(query.into_notices(), vec![Notice::success("Done")]);
        assert!(NoticeQuery::default().into_notices().is_empty());
    }
}
