//! Planets page and spacecraft transfers

use crate::error::PageResult;
use crate::flow::{run, Notice};
use crate::models::{Planet, PlanetId, Spacecraft, SpacecraftId};
use crate::routes::{
    failure_of, render_confirm, state_name, Answer, ConfirmPage, Confirmation, HiddenField,
    NoticeQuery,
};
use crate::state::{AppState, SharedState};
use crate::views::PlanetsView;
use axum::extract::{Form, Query, State};
use axum::response::Html;
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct PlanetCard<'a> {
    planet: &'a Planet,
    stationed: Vec<&'a Spacecraft>,
}

#[derive(Serialize)]
struct SpacecraftOption<'a> {
    id: &'a SpacecraftId,
    name: &'a str,
    location: &'a str,
}

/// Posted transfer form
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSubmission {
    spacecraft_id: Option<String>,
    planet_id: Option<String>,
    #[serde(flatten)]
    confirmation: Confirmation,
}

impl TransferSubmission {
    fn spacecraft(&self) -> Option<SpacecraftId> {
        self.spacecraft_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(SpacecraftId::from)
    }

    fn planet(&self) -> Option<PlanetId> {
        let raw = self.planet_id.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                debug!("Ignoring unparsable planet id {:?}", raw);
                None
            }
        }
    }
}

fn render(state: &AppState, view: &PlanetsView, notices: Vec<Notice>) -> PageResult<Html<String>> {
    let (planets, options) = match view.system() {
        Some(system) => {
            let planets: Vec<PlanetCard<'_>> = system
                .planets
                .iter()
                .map(|planet| PlanetCard {
                    planet,
                    stationed: system.stationed_at(planet.id),
                })
                .collect();
            let options: Vec<SpacecraftOption<'_>> = system
                .spacecraft
                .iter()
                .map(|craft| SpacecraftOption {
                    id: &craft.id,
                    name: &craft.name,
                    location: system
                        .planet(craft.current_location)
                        .map(|p| p.name.as_str())
                        .unwrap_or("Unknown"),
                })
                .collect();
            (planets, options)
        }
        None => (Vec::new(), Vec::new()),
    };

    let form = view.form();
    let html = state.templates.render(
        "planets.html",
        context! {
            state => state_name(view.state()),
            failure => failure_of(view.state()),
            planets => planets,
            spacecraft_options => options,
            form => context! {
                spacecraft_id => form.spacecraft_id,
                planet_id => form.planet_id,
            },
            errors => form.errors,
            notices => notices,
        },
    )?;
    Ok(Html(html))
}

/// GET /planets
pub async fn show(
    State(state): State<SharedState>,
    Query(query): Query<NoticeQuery>,
) -> PageResult<Html<String>> {
    let mut view = PlanetsView::new();
    let effects = view.mount();
    let settled = run(state.api.as_ref(), &mut view, effects).await;

    let mut notices = query.into_notices();
    notices.extend(settled.notices);
    render(&state, &view, notices)
}

/// POST /planets/transfer
///
/// Validates against freshly loaded lists, asks for confirmation, then
/// transfers and re-renders with both lists re-fetched.
pub async fn transfer(
    State(state): State<SharedState>,
    Form(submission): Form<TransferSubmission>,
) -> PageResult<Html<String>> {
    let mut view = PlanetsView::new();
    let effects = view.mount();
    let mut notices = run(state.api.as_ref(), &mut view, effects).await.notices;
    if view.system().is_none() {
        return render(&state, &view, notices);
    }

    view.select_spacecraft(submission.spacecraft());
    view.select_planet(submission.planet());
    view.submit_transfer();

    let Some(plan) = view.pending_transfer().cloned() else {
        return render(&state, &view, notices);
    };

    match submission.confirmation.answer() {
        Answer::Unasked => {
            return render_confirm(
                &state,
                ConfirmPage {
                    title: "Transfer Spacecraft",
                    prompt: plan.prompt(),
                    action: "/planets/transfer".to_string(),
                    fields: vec![
                        HiddenField {
                            name: "spacecraftId",
                            value: plan.request.spacecraft_id.to_string(),
                        },
                        HiddenField {
                            name: "planetId",
                            value: plan.request.target_planet_id.to_string(),
                        },
                    ],
                },
            );
        }
        Answer::Declined => {
            view.decline_transfer();
            return render(&state, &view, notices);
        }
        Answer::Accepted => {}
    }

    let effects = view.confirm_transfer();
    notices.extend(run(state.api.as_ref(), &mut view, effects).await.notices);
    render(&state, &view, notices)
}
