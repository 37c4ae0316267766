//! In-memory stand-in for the remote service, used by tests

use super::{ApiFailure, ApiOutcome, ApiResponse, SpaceTravelApi, TransportError};
use crate::models::{
    NewSpacecraft, Planet, PlanetId, Spacecraft, SpacecraftId, TransferRequest,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// How an injected fault surfaces
#[derive(Debug, Clone)]
pub enum Fault {
    /// `ApiResponse::Failure` with an optional server message
    Reject(Option<String>),
    /// `Err(TransportError)`
    Transport,
}

#[derive(Default)]
struct Inner {
    spacecraft: Vec<Spacecraft>,
    planets: Vec<Planet>,
    faults: HashMap<&'static str, Fault>,
    calls: Vec<&'static str>,
    next_id: u32,
}

#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

pub fn planet(id: i64, name: &str, population: i64) -> Planet {
    Planet {
        id: PlanetId(id),
        name: name.to_string(),
        current_population: population,
        picture_url: format!("https://example.com/{}.png", name.to_lowercase()),
    }
}

pub fn spacecraft(id: &str, name: &str, capacity: u64, location: i64) -> Spacecraft {
    Spacecraft {
        id: SpacecraftId::new(id),
        name: name.to_string(),
        capacity,
        description: format!("{} evacuation vessel", name),
        picture_url: None,
        current_location: PlanetId(location),
    }
}

impl FakeApi {
    pub fn new(spacecraft: Vec<Spacecraft>, planets: Vec<Planet>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                spacecraft,
                planets,
                next_id: 100,
                ..Default::default()
            }),
        }
    }

    /// Three planets and three spacecraft, two of them on Earth
    pub fn seeded() -> Self {
        Self::new(
            vec![
                spacecraft("sc-1", "Prophecy", 120_000, 2),
                spacecraft("sc-2", "Kepler", 5_000, 2),
                spacecraft("sc-3", "Orion", 30_000, 3),
            ],
            vec![
                planet(1, "Mercury", 0),
                planet(2, "Earth", 100_000),
                planet(3, "Mars", 20_000),
            ],
        )
    }

    /// Make every call to `operation` fail with `fault`
    pub fn fail(self, operation: &'static str, fault: Fault) -> Self {
        self.lock().faults.insert(operation, fault);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn spacecraft_snapshot(&self) -> Vec<Spacecraft> {
        self.lock().spacecraft.clone()
    }

    /// Remove a spacecraft behind the console's back
    pub fn destroy_spacecraft_directly(&self, id: &str) {
        self.lock().spacecraft.retain(|s| s.id.as_str() != id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and apply any injected fault
    fn enter<T>(&self, operation: &'static str) -> Option<ApiOutcome<T>> {
        let mut inner = self.lock();
        inner.calls.push(operation);
        match inner.faults.get(operation) {
            Some(Fault::Reject(message)) => Some(Ok(ApiResponse::Failure(ApiFailure::new(
                400,
                message.clone(),
            )))),
            Some(Fault::Transport) => Some(Err(TransportError::Unreachable(
                "fake service offline".to_string(),
            ))),
            None => None,
        }
    }
}

#[async_trait]
impl SpaceTravelApi for FakeApi {
    async fn list_spacecraft(&self) -> ApiOutcome<Vec<Spacecraft>> {
        if let Some(faulted) = self.enter("listSpacecraft") {
            return faulted;
        }
        Ok(ApiResponse::Data(self.lock().spacecraft.clone()))
    }

    async fn get_spacecraft(&self, id: &SpacecraftId) -> ApiOutcome<Option<Spacecraft>> {
        if let Some(faulted) = self.enter("getSpacecraft") {
            return faulted;
        }
        let found = self.lock().spacecraft.iter().find(|s| &s.id == id).cloned();
        Ok(ApiResponse::Data(found))
    }

    async fn build_spacecraft(&self, payload: &NewSpacecraft) -> ApiOutcome<Spacecraft> {
        if let Some(faulted) = self.enter("buildSpacecraft") {
            return faulted;
        }
        let mut inner = self.lock();
        inner.next_id += 1;
        let created = Spacecraft {
            id: SpacecraftId::new(format!("sc-{}", inner.next_id)),
            name: payload.name.clone(),
            capacity: payload.capacity,
            description: payload.description.clone(),
            picture_url: payload.picture_url.clone(),
            current_location: PlanetId(2),
        };
        inner.spacecraft.push(created.clone());
        Ok(ApiResponse::Data(created))
    }

    async fn destroy_spacecraft(&self, id: &SpacecraftId) -> ApiOutcome<()> {
        if let Some(faulted) = self.enter("destroySpacecraft") {
            return faulted;
        }
        let mut inner = self.lock();
        let before = inner.spacecraft.len();
        inner.spacecraft.retain(|s| &s.id != id);
        if inner.spacecraft.len() == before {
            return Ok(ApiResponse::Failure(ApiFailure::new(
                404,
                Some(format!("Spacecraft {} not found", id)),
            )));
        }
        Ok(ApiResponse::Data(()))
    }

    async fn list_planets(&self) -> ApiOutcome<Vec<Planet>> {
        if let Some(faulted) = self.enter("listPlanets") {
            return faulted;
        }
        Ok(ApiResponse::Data(self.lock().planets.clone()))
    }

    async fn transfer_spacecraft(&self, request: &TransferRequest) -> ApiOutcome<()> {
        if let Some(faulted) = self.enter("transferSpacecraft") {
            return faulted;
        }
        let mut inner = self.lock();
        if !inner.planets.iter().any(|p| p.id == request.target_planet_id) {
            return Ok(ApiResponse::Failure(ApiFailure::new(
                400,
                Some("Unknown destination planet".to_string()),
            )));
        }
        match inner
            .spacecraft
            .iter_mut()
            .find(|s| s.id == request.spacecraft_id)
        {
            Some(craft) => {
                craft.current_location = request.target_planet_id;
                Ok(ApiResponse::Data(()))
            }
            None => Ok(ApiResponse::Failure(ApiFailure::new(404, None))),
        }
    }
}
