//! Spacecraft models and request DTOs

use super::PlanetId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters of description shown on a fleet card before truncation
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Opaque spacecraft identifier assigned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpacecraftId(String);

impl SpacecraftId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpacecraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpacecraftId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SpacecraftId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A spacecraft as reported by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacecraft {
    pub id: SpacecraftId,
    pub name: String,
    pub capacity: u64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub current_location: PlanetId,
}

impl Spacecraft {
    /// Description shortened for list cards, suffixed with "..." when cut
    pub fn description_preview(&self) -> String {
        if self.description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
            let head: String = self
                .description
                .chars()
                .take(DESCRIPTION_PREVIEW_CHARS)
                .collect();
            format!("{}...", head)
        } else {
            self.description.clone()
        }
    }
}

/// Payload for building a new spacecraft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpacecraft {
    pub name: String,
    pub capacity: u64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Payload for sending a spacecraft to another planet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub spacecraft_id: SpacecraftId,
    pub target_planet_id: PlanetId,
}
