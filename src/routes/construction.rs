//! Spacecraft construction page

use crate::error::PageResult;
use crate::flow::{run, Notice};
use crate::routes::redirect;
use crate::state::{AppState, SharedState};
use crate::views::{BuildForm, ConstructionForm};
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use serde::Deserialize;

/// Posted form: the build fields plus which button was pressed
#[derive(Debug, Default, Deserialize)]
pub struct BuildSubmission {
    #[serde(flatten)]
    fields: BuildForm,
    action: Option<String>,
}

fn render(state: &AppState, form: &ConstructionForm, notices: Vec<Notice>) -> PageResult<Html<String>> {
    let html = state.templates.render(
        "construction.html",
        context! {
            fields => form.fields(),
            errors => form.errors(),
            notices => notices,
        },
    )?;
    Ok(Html(html))
}

/// GET /construction
pub async fn show(State(state): State<SharedState>) -> PageResult<Html<String>> {
    render(&state, &ConstructionForm::new(), Vec::new())
}

/// POST /construction
pub async fn build(
    State(state): State<SharedState>,
    Form(submission): Form<BuildSubmission>,
) -> PageResult<Response> {
    let mut form = ConstructionForm::with_fields(submission.fields);
    let effects = match submission.action.as_deref() {
        Some("cancel") => form.cancel(),
        _ => form.submit(),
    };
    let settled = run(state.api.as_ref(), &mut form, effects).await;

    match settled.navigate {
        Some(route) => redirect(&route, &settled.notices),
        None => Ok(render(&state, &form, settled.notices)?.into_response()),
    }
}
