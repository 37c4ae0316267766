//! Fleet list view
//!
//! Fetches the whole fleet on mount. Destroying a spacecraft patches the
//! in-memory list instead of re-fetching it.

use super::destroy::{self, DestroyTarget};
use crate::api::{ApiCall, ApiReply};
use crate::flow::lifecycle::load;
use crate::flow::{
    CallOutcome, Effect, FetchState, Lifecycle, Mutation, Notice, Screen, Ticket, Tickets,
};
use crate::models::{Spacecraft, SpacecraftId};
use tracing::{debug, warn};

pub const FLEET_LOAD_FAILED: &str = "Failed to load spacecraft. Please try again.";

#[derive(Debug, Default)]
pub struct FleetView {
    tickets: Tickets,
    fleet: Lifecycle<Vec<Spacecraft>>,
    destroy: Mutation<DestroyTarget>,
}

impl FleetView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        let ticket = self.tickets.issue();
        self.fleet.begin(ticket);
        vec![Effect::call(ticket, ApiCall::ListSpacecraft)]
    }

    pub fn state(&self) -> &FetchState<Vec<Spacecraft>> {
        self.fleet.state()
    }

    pub fn spacecraft(&self) -> Option<&[Spacecraft]> {
        self.fleet.data().map(Vec::as_slice)
    }

    /// Summed in `u128` so no fleet the service can return overflows
    pub fn total_capacity(&self) -> u128 {
        self.spacecraft()
            .map(|list| list.iter().map(|s| u128::from(s.capacity)).sum())
            .unwrap_or(0)
    }

    pub fn pending_destroy(&self) -> Option<&DestroyTarget> {
        self.destroy.pending_confirmation()
    }

    pub fn is_destroying(&self) -> bool {
        self.destroy.is_submitting()
    }

    /// Ask for confirmation before destroying `id`
    pub fn request_destroy(&mut self, id: &SpacecraftId) -> Vec<Effect> {
        let Some(list) = self.spacecraft() else {
            debug!("Fleet not loaded, ignoring destroy request for {}", id);
            return Vec::new();
        };
        let target = list.iter().find(|s| &s.id == id).map(DestroyTarget::of);

        match target {
            Some(target) => {
                if !self.destroy.ask(target) {
                    debug!("Destroy already in progress, ignoring request for {}", id);
                }
                Vec::new()
            }
            None => {
                warn!("Destroy requested for spacecraft {} not in the fleet", id);
                vec![Effect::Notify(Notice::error("Spacecraft not found."))]
            }
        }
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
        if let Some(target) = self.destroy.decline() {
            debug!("Destroy of {} declined", target.name);
        }
        Vec::new()
    }
}

impl Screen for FleetView {
    fn receive(&mut self, ticket: Ticket, outcome: CallOutcome) -> Vec<Effect> {
        if self.fleet.is_current(ticket) {
            let result = load(outcome, FLEET_LOAD_FAILED, |reply| match reply {
                ApiReply::Fleet(list) => Some(list),
                _ => None,
            });
            self.fleet.settle(ticket, result);
            return Vec::new();
        }

        if let Some(target) = self.destroy.finish(ticket) {
            return match destroy::settle(outcome, &target) {
                Ok(notice) => {
                    if let Some(list) = self.fleet.data_mut() {
                        list.retain(|s| s.id != target.id);
                    }
                    vec![Effect::Notify(notice)]
                }
                Err(notice) => vec![Effect::Notify(notice)],
            };
        }

        debug!("Fleet view discarding outcome for {:?}", ticket);
        Vec::new()
    }
}
