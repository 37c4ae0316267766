//! Spacecraft construction form

use crate::api::{ApiCall, ApiReply};
use crate::flow::mutation::resolve;
use crate::flow::{
    CallOutcome, Effect, FieldErrors, Mutation, Notice, Screen, Ticket, Tickets, UNEXPECTED_ERROR,
};
use crate::models::NewSpacecraft;
use crate::navigation::Route;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use validator::{Validate, ValidationError};

pub const BUILD_FAILED: &str = "Failed to build spacecraft. Please try again.";

/// Raw form input, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildForm {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_capacity"))]
    pub capacity: String,

    #[validate(custom(function = "validate_description"))]
    pub description: String,

    #[validate(custom(function = "validate_picture_url"))]
    pub picture_url: String,
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(rule("required", "Spacecraft name is required"));
    }
    Ok(())
}

/// Largest integer a JSON number carries without losing precision
const MAX_CAPACITY: u64 = 9_007_199_254_740_991;

fn validate_capacity(capacity: &str) -> Result<(), ValidationError> {
    let capacity = capacity.trim();
    if capacity.is_empty() {
        return Err(rule("required", "Capacity is required"));
    }
    match capacity.parse::<u64>() {
        Ok(value) if (1..=MAX_CAPACITY).contains(&value) => Ok(()),
        _ => Err(rule("positive", "Capacity must be a positive number")),
    }
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(rule("required", "Description is required"));
    }
    Ok(())
}

fn validate_picture_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http") {
        return Ok(());
    }
    Err(rule("scheme", "Picture URL must start with http:// or https://"))
}

impl BuildForm {
    /// Validated, trimmed payload for the build call
    pub fn payload(&self) -> Result<NewSpacecraft, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;

        let capacity = self.capacity.trim().parse::<u64>().map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.set(BuildField::Capacity.key(), "Capacity must be a positive number");
            errors
        })?;
        let picture_url = match self.picture_url.trim() {
            "" => None,
            url => Some(url.to_string()),
        };

        Ok(NewSpacecraft {
            name: self.name.trim().to_string(),
            capacity,
            description: self.description.trim().to_string(),
            picture_url,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildField {
    Name,
    Capacity,
    Description,
    PictureUrl,
}

impl BuildField {
    /// Key used in [`FieldErrors`]
    pub fn key(self) -> &'static str {
        match self {
            BuildField::Name => "name",
            BuildField::Capacity => "capacity",
            BuildField::Description => "description",
            BuildField::PictureUrl => "picture_url",
        }
    }
}

#[derive(Debug, Default)]
pub struct ConstructionForm {
    tickets: Tickets,
    fields: BuildForm,
    errors: FieldErrors,
    build: Mutation<String>,
}

impl ConstructionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: BuildForm) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn fields(&self) -> &BuildForm {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.build.is_submitting()
    }

    pub fn edit(&mut self, field: BuildField, value: impl Into<String>) {
        if self.build.is_submitting() {
            return;
        }
        let value = value.into();
        match field {
            BuildField::Name => self.fields.name = value,
            BuildField::Capacity => self.fields.capacity = value,
            BuildField::Description => self.fields.description = value,
            BuildField::PictureUrl => self.fields.picture_url = value,
        }
        self.errors.clear(field.key());
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        if !self.build.is_idle() {
            debug!("Build already in progress, ignoring submit");
            return Vec::new();
        }

        let payload = match self.fields.payload() {
            Ok(payload) => payload,
            Err(errors) => {
                debug!("Build rejected by validation: {:?}", errors);
                self.errors = errors;
                return Vec::new();
            }
        };

        self.errors.clear_all();
        let ticket = self.tickets.issue();
        self.build.submit(ticket, payload.name.clone());
        debug!("Building spacecraft {}", payload.name);
        vec![Effect::call(ticket, ApiCall::BuildSpacecraft(payload))]
    }

    /// Leave the form for the fleet list
    pub fn cancel(&mut self) -> Vec<Effect> {
        if self.build.is_submitting() {
            return Vec::new();
        }
        vec![Effect::Navigate(Route::Fleet)]
    }
}

impl Screen for ConstructionForm {
    fn receive(&mut self, ticket: Ticket, outcome: CallOutcome) -> Vec<Effect> {
        let Some(name) = self.build.finish(ticket) else {
            debug!("Construction form discarding outcome for {:?}", ticket);
            return Vec::new();
        };

        match resolve(outcome, "Build", BUILD_FAILED) {
            Ok(ApiReply::Built(created)) => {
                info!("Spacecraft built: {} (id: {})", created.name, created.id);
                vec![
                    Effect::Notify(Notice::success(format!(
                        "{} has been successfully built!",
                        name
                    ))),
                    Effect::Navigate(Route::Fleet),
                ]
            }
            Ok(other) => {
                error!("Build returned an unexpected reply: {:?}", other);
                vec![Effect::Notify(Notice::error(UNEXPECTED_ERROR))]
            }
            Err(notice) => vec![Effect::Notify(notice)],
        }
    }
}
