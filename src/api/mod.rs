//! Remote Space Travel API
//!
//! Every operation performs exactly one network call and normalizes the
//! outcome into two layers:
//! - `Err(TransportError)`: the call itself failed (unreachable, timeout,
//!   undecodable body). Callers treat it as unexpected.
//! - `Ok(ApiResponse::Failure)`: the service answered but rejected the
//!   request (validation, not found, invalid transfer).
//!
//! No retries and no caching happen at this layer.

pub mod http;

#[cfg(test)]
pub mod fake;

pub use http::HttpSpaceTravelApi;

use crate::models::{NewSpacecraft, Planet, Spacecraft, SpacecraftId, TransferRequest};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Failure to complete a call at all
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Service unreachable: {0}")]
    Unreachable(String),
}

/// Application-level rejection reported by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub message: Option<String>,
}

impl ApiFailure {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Server message, or `fallback` when the service sent none
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Either the data of a successful call or the service's rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Data(T),
    Failure(ApiFailure),
}

impl<T> ApiResponse<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Failure(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Data(data) => Some(data),
            ApiResponse::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            ApiResponse::Data(data) => Ok(data),
            ApiResponse::Failure(failure) => Err(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Data(data) => ApiResponse::Data(f(data)),
            ApiResponse::Failure(failure) => ApiResponse::Failure(failure),
        }
    }
}

/// Result of one API call
pub type ApiOutcome<T> = Result<ApiResponse<T>, TransportError>;

/// Operations offered by the remote service
#[async_trait]
pub trait SpaceTravelApi: Send + Sync {
    async fn list_spacecraft(&self) -> ApiOutcome<Vec<Spacecraft>>;

    /// `Data(None)` when the service knows no such spacecraft
    async fn get_spacecraft(&self, id: &SpacecraftId) -> ApiOutcome<Option<Spacecraft>>;

    async fn build_spacecraft(&self, payload: &NewSpacecraft) -> ApiOutcome<Spacecraft>;

    async fn destroy_spacecraft(&self, id: &SpacecraftId) -> ApiOutcome<()>;

    async fn list_planets(&self) -> ApiOutcome<Vec<Planet>>;

    async fn transfer_spacecraft(&self, request: &TransferRequest) -> ApiOutcome<()>;
}

/// An API call described as data, so state machines can request it
/// without performing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListSpacecraft,
    GetSpacecraft(SpacecraftId),
    BuildSpacecraft(NewSpacecraft),
    DestroySpacecraft(SpacecraftId),
    ListPlanets,
    TransferSpacecraft(TransferRequest),
}

impl ApiCall {
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::ListSpacecraft => "listSpacecraft",
            ApiCall::GetSpacecraft(_) => "getSpacecraft",
            ApiCall::BuildSpacecraft(_) => "buildSpacecraft",
            ApiCall::DestroySpacecraft(_) => "destroySpacecraft",
            ApiCall::ListPlanets => "listPlanets",
            ApiCall::TransferSpacecraft(_) => "transferSpacecraft",
        }
    }
}

/// Successful payload of an [`ApiCall`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    Fleet(Vec<Spacecraft>),
    Spacecraft(Option<Spacecraft>),
    Built(Spacecraft),
    Destroyed,
    Planets(Vec<Planet>),
    Transferred,
}

/// Perform `call` against `api`
pub async fn dispatch(api: &dyn SpaceTravelApi, call: &ApiCall) -> ApiOutcome<ApiReply> {
    debug!("Dispatching API call: {}", call.name());

    let outcome = match call {
        ApiCall::ListSpacecraft => api.list_spacecraft().await?.map(ApiReply::Fleet),
        ApiCall::GetSpacecraft(id) => api.get_spacecraft(id).await?.map(ApiReply::Spacecraft),
        ApiCall::BuildSpacecraft(payload) => {
            api.build_spacecraft(payload).await?.map(ApiReply::Built)
        }
        ApiCall::DestroySpacecraft(id) => {
            api.destroy_spacecraft(id).await?.map(|_| ApiReply::Destroyed)
        }
        ApiCall::ListPlanets => api.list_planets().await?.map(ApiReply::Planets),
        ApiCall::TransferSpacecraft(request) => api
            .transfer_spacecraft(request)
            .await?
            .map(|_| ApiReply::Transferred),
    };

    Ok(outcome)
}
