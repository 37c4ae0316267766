//! Spacecraft detail pages

use crate::error::PageResult;
use crate::flow::{run, Notice};
use crate::navigation::console_path;
use crate::routes::{
    failure_of, redirect, render_confirm, state_name, Answer, ConfirmPage, Confirmation,
    NoticeQuery,
};
use crate::state::{AppState, SharedState};
use crate::views::SpacecraftView;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;

fn render(state: &AppState, view: &SpacecraftView, notices: Vec<Notice>) -> PageResult<Html<String>> {
    let html = state.templates.render(
        "spacecraft.html",
        context! {
            detail_path => console_path(&["spacecraft", view.id().as_str()]),
            destroy_path => console_path(&["spacecraft", view.id().as_str(), "destroy"]),
            state => state_name(view.state()),
            failure => failure_of(view.state()),
            spacecraft => view.spacecraft(),
            notices => notices,
        },
    )?;
    Ok(Html(html))
}

/// GET /spacecraft/{id}
pub async fn show(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> PageResult<Html<String>> {
    let mut view = SpacecraftView::new(id.into());
    let effects = view.mount();
    let settled = run(state.api.as_ref(), &mut view, effects).await;

    let mut notices = query.into_notices();
    notices.extend(settled.notices);
    render(&state, &view, notices)
}

/// POST /spacecraft/{id}/destroy
pub async fn destroy(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(confirmation): Form<Confirmation>,
) -> PageResult<Response> {
    let mut view = SpacecraftView::new(id.into());
    let effects = view.mount();
    let mut notices = run(state.api.as_ref(), &mut view, effects).await.notices;

    view.request_destroy();
    let Some(target) = view.pending_destroy().cloned() else {
        return Ok(render(&state, &view, notices)?.into_response());
    };

    match confirmation.answer() {
        Answer::Unasked => {
            let page = ConfirmPage {
                title: "Destroy Spacecraft",
                prompt: target.prompt(),
                action: console_path(&["spacecraft", target.id.as_str(), "destroy"]),
                fields: Vec::new(),
            };
            return Ok(render_confirm(&state, page)?.into_response());
        }
        Answer::Declined => {
            view.decline_destroy();
            return Ok(render(&state, &view, notices)?.into_response());
        }
        Answer::Accepted => {}
    }

    let effects = view.confirm_destroy();
    let settled = run(state.api.as_ref(), &mut view, effects).await;
    notices.extend(settled.notices);

    match settled.navigate {
        Some(route) => redirect(&route, &notices),
        None => Ok(render(&state, &view, notices)?.into_response()),
    }
}
