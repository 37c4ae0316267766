//! Fleet list pages

use crate::error::PageResult;
use crate::flow::{run, Notice};
use crate::models::{Spacecraft, SpacecraftId};
use crate::navigation::{console_path, Route};
use crate::routes::{
    failure_of, render_confirm, state_name, Answer, ConfirmPage, Confirmation, NoticeQuery,
};
use crate::state::{AppState, SharedState};
use crate::views::FleetView;
use axum::extract::{Form, Path, Query, State};
use axum::response::Html;
use minijinja::context;
use serde::Serialize;

#[derive(Serialize)]
struct FleetCard<'a> {
    spacecraft: &'a Spacecraft,
    preview: String,
    detail_path: String,
    destroy_path: String,
}

fn render(state: &AppState, view: &FleetView, notices: Vec<Notice>) -> PageResult<Html<String>> {
    let cards: Vec<FleetCard<'_>> = view
        .spacecraft()
        .unwrap_or_default()
        .iter()
        .map(|spacecraft| FleetCard {
            spacecraft,
            preview: spacecraft.description_preview(),
            detail_path: Route::Spacecraft(spacecraft.id.clone()).path(),
            destroy_path: destroy_path(&spacecraft.id),
        })
        .collect();

    let html = state.templates.render(
        "fleet.html",
        context! {
            state => state_name(view.state()),
            failure => failure_of(view.state()),
            total => cards.len(),
            capacity => view.total_capacity(),
            cards => cards,
            notices => notices,
        },
    )?;
    Ok(Html(html))
}

fn destroy_path(id: &SpacecraftId) -> String {
    console_path(&["spacecrafts", id.as_str(), "destroy"])
}

/// GET /spacecrafts
pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<NoticeQuery>,
) -> PageResult<Html<String>> {
    let mut view = FleetView::new();
    let effects = view.mount();
    let settled = run(state.api.as_ref(), &mut view, effects).await;

    let mut notices = query.into_notices();
    notices.extend(settled.notices);
    render(&state, &view, notices)
}

/// POST /spacecrafts/{id}/destroy
///
/// The first submission only asks. `confirm=yes` destroys, `confirm=no`
/// returns to the list without a call.
pub async fn destroy(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(confirmation): Form<Confirmation>,
) -> PageResult<Html<String>> {
    let id = SpacecraftId::new(id);
    let mut view = FleetView::new();
    let effects = view.mount();
    let mut notices = run(state.api.as_ref(), &mut view, effects).await.notices;

    let effects = view.request_destroy(&id);
    notices.extend(run(state.api.as_ref(), &mut view, effects).await.notices);

    let Some(target) = view.pending_destroy().cloned() else {
        return render(&state, &view, notices);
    };

    match confirmation.answer() {
        Answer::Unasked => {
            return render_confirm(
                &state,
                ConfirmPage {
                    title: "Destroy Spacecraft",
                    prompt: target.prompt(),
                    action: destroy_path(&target.id),
                    fields: Vec::new(),
                },
            );
        }
        Answer::Declined => {
            view.decline_destroy();
            return render(&state, &view, notices);
        }
        Answer::Accepted => {}
    }

    let effects = view.confirm_destroy();
    notices.extend(run(state.api.as_ref(), &mut view, effects).await.notices);
    render(&state, &view, notices)
}
