//! Planets view with the transfer form
//!
//! Loads planets and spacecraft concurrently and only leaves `loading`
//! when both have arrived. A successful transfer re-fetches both lists in
//! full and clears the form.

use crate::api::{ApiCall, ApiReply};
use crate::flow::lifecycle::load;
use crate::flow::mutation::resolve;
use crate::flow::{
    CallOutcome, Effect, FetchState, FieldErrors, Join, Lifecycle, Mutation, Notice, Screen,
    Ticket, Tickets, UNEXPECTED_ERROR,
};
use crate::models::{Planet, PlanetId, Spacecraft, SpacecraftId, TransferRequest};
use tracing::{debug, error, info};

pub const PLANETS_LOAD_FAILED: &str = "Failed to load data. Please try again.";
pub const TRANSFER_FAILED: &str = "Transfer failed";

pub const SPACECRAFT_FIELD: &str = "spacecraft";
pub const PLANET_FIELD: &str = "planet";

/// Planets together with the spacecraft stationed on them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolarSystem {
    pub planets: Vec<Planet>,
    pub spacecraft: Vec<Spacecraft>,
}

impl SolarSystem {
    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn spacecraft(&self, id: &SpacecraftId) -> Option<&Spacecraft> {
        self.spacecraft.iter().find(|s| &s.id == id)
    }

    pub fn stationed_at(&self, planet: PlanetId) -> Vec<&Spacecraft> {
        self.spacecraft
            .iter()
            .filter(|s| s.current_location == planet)
            .collect()
    }
}

/// Current selections of the transfer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub spacecraft_id: Option<SpacecraftId>,
    pub planet_id: Option<PlanetId>,
    pub errors: FieldErrors,
}

/// A validated transfer waiting for confirmation or in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub request: TransferRequest,
    pub spacecraft_name: String,
    pub planet_name: String,
}

impl TransferPlan {
    pub fn prompt(&self) -> String {
        format!("Send {} to {}?", self.spacecraft_name, self.planet_name)
    }
}

type SystemJoin = Join<Vec<Planet>, Vec<Spacecraft>>;

#[derive(Debug, Default)]
pub struct PlanetsView {
    tickets: Tickets,
    system: Lifecycle<SolarSystem>,
    pending: Option<SystemJoin>,
    form: TransferForm,
    transfer: Mutation<TransferPlan>,
}

impl PlanetsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        let generation = self.tickets.issue();
        self.system.begin(generation);
        self.fetch_both(generation)
    }

    /// Re-fetch both lists while keeping the current ones on screen
    pub fn refresh(&mut self) -> Vec<Effect> {
        let generation = self.tickets.issue();
        self.system.begin_refresh(generation);
        self.fetch_both(generation)
    }

    fn fetch_both(&mut self, generation: Ticket) -> Vec<Effect> {
        let planets = self.tickets.issue();
        let spacecraft = self.tickets.issue();
        self.pending = Some(Join::new(generation, planets, spacecraft));
        vec![
            Effect::call(planets, ApiCall::ListPlanets),
            Effect::call(spacecraft, ApiCall::ListSpacecraft),
        ]
    }

    pub fn state(&self) -> &FetchState<SolarSystem> {
        self.system.state()
    }

    pub fn system(&self) -> Option<&SolarSystem> {
        self.system.data()
    }

    pub fn form(&self) -> &TransferForm {
        &self.form
    }

    pub fn is_transferring(&self) -> bool {
        self.transfer.is_submitting()
    }

    pub fn pending_transfer(&self) -> Option<&TransferPlan> {
        self.transfer.pending_confirmation()
    }

    pub fn select_spacecraft(&mut self, id: Option<SpacecraftId>) {
        if self.transfer.is_submitting() {
            return;
        }
        self.form.spacecraft_id = id;
        self.form.errors.clear(SPACECRAFT_FIELD);
    }

    pub fn select_planet(&mut self, id: Option<PlanetId>) {
        if self.transfer.is_submitting() {
            return;
        }
        self.form.planet_id = id;
        self.form.errors.clear(PLANET_FIELD);
    }

    /// Validate the selections and ask for confirmation
    pub fn submit_transfer(&mut self) -> Vec<Effect> {
        if !self.transfer.is_idle() {
            debug!("Transfer already pending, ignoring submit");
            return Vec::new();
        }

        match self.validate() {
            Ok(plan) => {
                debug!("Transfer validated: {}", plan.prompt());
                self.form.errors.clear_all();
                self.transfer.ask(plan);
            }
            Err(errors) => {
                debug!("Transfer rejected by validation: {:?}", errors);
                self.form.errors = errors;
            }
        }
        Vec::new()
    }

    pub fn confirm_transfer(&mut self) -> Vec<Effect> {
        let ticket = self.tickets.issue();
        match self.transfer.confirm(ticket) {
            Some(plan) => vec![Effect::call(
                ticket,
                ApiCall::TransferSpacecraft(plan.request.clone()),
            )],
            None => Vec::new(),
        }
    }

    pub fn decline_transfer(&mut self) -> Vec<Effect> {
        self.transfer.decline();
        Vec::new()
    }

    fn validate(&self) -> Result<TransferPlan, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.form.spacecraft_id.is_none() {
            errors.set(SPACECRAFT_FIELD, "Please select a spacecraft");
        }
        if self.form.planet_id.is_none() {
            errors.set(PLANET_FIELD, "Please select a destination planet");
        }
        let (Some(spacecraft_id), Some(planet_id)) = (&self.form.spacecraft_id, self.form.planet_id)
        else {
            return Err(errors);
        };

        let resolved = self
            .system
            .data()
            .and_then(|system| Some((system.spacecraft(spacecraft_id)?, system.planet(planet_id)?)));
        let Some((spacecraft, planet)) = resolved else {
            errors.set(SPACECRAFT_FIELD, "Invalid selection");
            return Err(errors);
        };

        if spacecraft.current_location == planet.id {
            errors.set(
                PLANET_FIELD,
                format!("{} is already on {}!", spacecraft.name, planet.name),
            );
            return Err(errors);
        }

        Ok(TransferPlan {
            request: TransferRequest {
                spacecraft_id: spacecraft.id.clone(),
                target_planet_id: planet.id,
            },
            spacecraft_name: spacecraft.name.clone(),
            planet_name: planet.name.clone(),
        })
    }

    fn receive_fetch(&mut self, ticket: Ticket, outcome: CallOutcome) {
        let Some(join) = self.pending.as_mut() else {
            return;
        };

        let accepted = if ticket == join.left_ticket() {
            let planets = load(outcome, PLANETS_LOAD_FAILED, |reply| match reply {
                ApiReply::Planets(list) => Some(list),
                _ => None,
            });
            join.offer_left(ticket, planets)
        } else {
            let spacecraft = load(outcome, PLANETS_LOAD_FAILED, |reply| match reply {
                ApiReply::Fleet(list) => Some(list),
                _ => None,
            });
            join.offer_right(ticket, spacecraft)
        };

        if !accepted || !join.is_complete() {
            return;
        }

        if let Some(join) = self.pending.take() {
            let generation = join.generation();
            if let Some(result) = join.finish() {
                let result = result.map(|(planets, spacecraft)| SolarSystem { planets, spacecraft });
                self.system.settle(generation, result);
            }
        }
    }

    fn owns_fetch(&self, ticket: Ticket) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|join| join.left_ticket() == ticket || join.right_ticket() == ticket)
    }
}

impl Screen for PlanetsView {
    fn receive(&mut self, ticket: Ticket, outcome: CallOutcome) -> Vec<Effect> {
        if self.owns_fetch(ticket) {
            self.receive_fetch(ticket, outcome);
            return Vec::new();
        }

        if let Some(plan) = self.transfer.finish(ticket) {
            return match resolve(outcome, "Transfer", TRANSFER_FAILED) {
                Ok(ApiReply::Transferred) => {
                    info!(
                        "Spacecraft {} sent to planet {}",
                        plan.request.spacecraft_id, plan.request.target_planet_id
                    );
                    self.form = TransferForm::default();
                    let mut effects = vec![Effect::Notify(Notice::success("Transfer successful!"))];
                    effects.extend(self.refresh());
                    effects
                }
                Ok(other) => {
                    error!("Transfer returned an unexpected reply: {:?}", other);
                    vec![Effect::Notify(Notice::error(UNEXPECTED_ERROR))]
                }
                Err(notice) => vec![Effect::Notify(notice)],
            };
        }

        debug!("Planets view discarding outcome for {:?}", ticket);
        Vec::new()
    }
}
