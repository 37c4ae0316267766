//! Spacecraft detail view
//!
//! Keyed by the spacecraft id from the path. Moving to another id resets
//! the view to `loading`; a late result for the previous id is dropped.

use super::destroy::{self, DestroyTarget};
use crate::api::{ApiCall, ApiReply};
use crate::flow::lifecycle::load;
use crate::flow::{
    CallOutcome, Effect, FetchState, Lifecycle, LoadFailure, Mutation, Screen, Ticket, Tickets,
};
use crate::models::{Spacecraft, SpacecraftId};
use crate::navigation::Route;
use tracing::debug;

pub const DETAIL_LOAD_FAILED: &str = "Failed to load spacecraft details.";
pub const NOT_FOUND_TITLE: &str = "Spacecraft not found.";

#[derive(Debug)]
pub struct SpacecraftView {
    tickets: Tickets,
    id: SpacecraftId,
    craft: Lifecycle<Spacecraft>,
    destroy: Mutation<DestroyTarget>,
}

impl SpacecraftView {
    pub fn new(id: SpacecraftId) -> Self {
        Self {
            tickets: Tickets::default(),
            id,
            craft: Lifecycle::new(),
            destroy: Mutation::new(),
        }
    }

    pub fn id(&self) -> &SpacecraftId {
        &self.id
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        let ticket = self.tickets.issue();
        self.craft.begin(ticket);
        vec![Effect::call(ticket, ApiCall::GetSpacecraft(self.id.clone()))]
    }

    /// Switch to another spacecraft; always re-fetches
    pub fn navigate_to(&mut self, id: SpacecraftId) -> Vec<Effect> {
        debug!("Detail view moving from {} to {}", self.id, id);
        self.id = id;
        self.destroy = Mutation::new();
        self.mount()
    }

    pub fn state(&self) -> &FetchState<Spacecraft> {
        self.craft.state()
    }

    pub fn spacecraft(&self) -> Option<&Spacecraft> {
        self.craft.data()
    }

    pub fn pending_destroy(&self) -> Option<&DestroyTarget> {
        self.destroy.pending_confirmation()
    }

    pub fn request_destroy(&mut self) -> Vec<Effect> {
        if let Some(target) = self.craft.data().map(DestroyTarget::of) {
            self.destroy.ask(target);
        }
        Vec::new()
    }

    pub fn confirm_destroy(&mut self) -> Vec<Effect> {
        let ticket = self.tickets.issue();
        match self.destroy.confirm(ticket) {
            Some(target) => vec![Effect::call(
                ticket,
                ApiCall::DestroySpacecraft(target.id.clone()),
            )],
            None => Vec::new(),
        }
    }

    pub fn decline_destroy(&mut self) -> Vec<Effect> {
        self.destroy.decline();
        Vec::new()
    }

    fn not_found(&self) -> LoadFailure {
        LoadFailure::NotFound {
            title: NOT_FOUND_TITLE.to_string(),
            detail: format!("No spacecraft exists with ID: {}", self.id),
        }
    }
}

impl Screen for SpacecraftView {
    fn receive(&mut self, ticket: Ticket, outcome: CallOutcome) -> Vec<Effect> {
        if self.craft.is_current(ticket) {
            let result = load(outcome, DETAIL_LOAD_FAILED, |reply| match reply {
                ApiReply::Spacecraft(found) => Some(found),
                _ => None,
            })
            .and_then(|found| found.ok_or_else(|| self.not_found()));
            self.craft.settle(ticket, result);
            return Vec::new();
        }

        if let Some(target) = self.destroy.finish(ticket) {
            return match destroy::settle(outcome, &target) {
                Ok(notice) => vec![Effect::Notify(notice), Effect::Navigate(Route::Fleet)],
                Err(notice) => vec![Effect::Notify(notice)],
            };
        }

        debug!("Detail view discarding outcome for {:?}", ticket);
        Vec::new()
    }
}
