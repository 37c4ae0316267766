//! Effect runtime
//!
//! Performs the calls a view asks for and feeds the outcomes back. All
//! calls emitted in one batch run concurrently; their outcomes are then
//! delivered to the view one after another, so a view never sees two
//! transitions at once.

use super::{CallOutcome, Effect, Notice, Ticket};
use crate::api::{dispatch, SpaceTravelApi};
use crate::navigation::Route;
use futures::future::join_all;
use tracing::debug;

/// A view that reacts to call outcomes
pub trait Screen: Send {
    fn receive(&mut self, ticket: Ticket, outcome: CallOutcome) -> Vec<Effect>;
}

/// What remains once every requested call has settled
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settled {
    pub notices: Vec<Notice>,
    /// Last navigation requested, if any
    pub navigate: Option<Route>,
    /// Network calls performed
    pub calls: usize,
}

/// Run `effects` against `api` until the screen stops asking for calls
pub async fn run<S: Screen>(api: &dyn SpaceTravelApi, screen: &mut S, effects: Vec<Effect>) -> Settled {
    let mut settled = Settled::default();
    let mut queue = effects;

    loop {
        let mut batch = Vec::new();
        for effect in queue.drain(..) {
            match effect {
                Effect::Call { ticket, call } => batch.push((ticket, call)),
                Effect::Navigate(route) => settled.navigate = Some(route),
                Effect::Notify(notice) => settled.notices.push(notice),
            }
        }

        if batch.is_empty() {
            break;
        }

        debug!("Running {} API call(s)", batch.len());
        settled.calls += batch.len();
        let outcomes = join_all(batch.iter().map(|(_, call)| dispatch(api, call))).await;

        for ((ticket, _), outcome) in batch.into_iter().zip(outcomes) {
            queue.extend(screen.receive(ticket, outcome));
        }
    }

    settled
}
