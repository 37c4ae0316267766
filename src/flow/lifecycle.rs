//! Fetch-on-mount lifecycle: `loading → ready | failed`

use super::{CallOutcome, Ticket, UNEXPECTED_ERROR};
use crate::api::{ApiReply, ApiResponse};
use tracing::{debug, error, warn};

/// Why a view could not reach `ready`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The fetch failed (service rejection or transport failure)
    Unavailable(String),
    /// The fetch succeeded but the entity does not exist
    NotFound { title: String, detail: String },
}

impl LoadFailure {
    pub fn unavailable(message: impl Into<String>) -> Self {
        LoadFailure::Unavailable(message.into())
    }

    pub fn title(&self) -> &str {
        match self {
            LoadFailure::Unavailable(message) => message,
            LoadFailure::NotFound { title, .. } => title,
        }
    }

    /// Second line shown under the title, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            LoadFailure::Unavailable(_) => None,
            LoadFailure::NotFound { detail, .. } => Some(detail),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadFailure::NotFound { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(LoadFailure),
}

/// Fetch state plus the ticket of the fetch it is waiting on
#[derive(Debug)]
pub struct Lifecycle<T> {
    state: FetchState<T>,
    awaiting: Option<Ticket>,
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Lifecycle<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Loading,
            awaiting: None,
        }
    }

    /// Start a fresh fetch; the view shows `loading` until it settles
    pub fn begin(&mut self, ticket: Ticket) {
        self.state = FetchState::Loading;
        self.awaiting = Some(ticket);
    }

    /// Start a background re-fetch, keeping the current state visible
    pub fn begin_refresh(&mut self, ticket: Ticket) {
        self.awaiting = Some(ticket);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.awaiting == Some(ticket)
    }

    /// Apply a fetch result; stale tickets are ignored and return false
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, LoadFailure>) -> bool {
        if !self.is_current(ticket) {
            debug!("Discarding stale fetch result for {:?}", ticket);
            return false;
        }
        self.awaiting = None;
        self.state = match result {
            Ok(data) => FetchState::Ready(data),
            Err(failure) => FetchState::Failed(failure),
        };
        true
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match &self.state {
            FetchState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    /// True while any fetch (initial or refresh) is outstanding
    pub fn is_fetching(&self) -> bool {
        self.awaiting.is_some()
    }
}

/// Turn a call outcome into fetch data
///
/// `extract` picks the expected reply variant. Service rejections map to
/// `failed_message`, transport failures and unexpected replies to the
/// generic message.
pub fn load<T>(
    outcome: CallOutcome,
    failed_message: &str,
    extract: impl FnOnce(ApiReply) -> Option<T>,
) -> Result<T, LoadFailure> {
    match outcome {
        Ok(ApiResponse::Data(reply)) => extract(reply).ok_or_else(|| {
            error!("Fetch returned an unexpected reply");
            LoadFailure::unavailable(UNEXPECTED_ERROR)
        }),
        Ok(ApiResponse::Failure(failure)) => {
            warn!(
                "Fetch rejected by service ({}): {}",
                failure.status,
                failure.message.as_deref().unwrap_or("no message")
            );
            Err(LoadFailure::unavailable(failed_message))
        }
        Err(e) => {
            error!("Fetch failed: {}", e);
            Err(LoadFailure::unavailable(UNEXPECTED_ERROR))
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    ticket: Ticket,
    value: Option<Result<T, LoadFailure>>,
}

impl<T> Slot<T> {
    fn new(ticket: Ticket) -> Self {
        Self { ticket, value: None }
    }

    fn offer(&mut self, ticket: Ticket, value: Result<T, LoadFailure>) -> bool {
        if self.ticket != ticket || self.value.is_some() {
            return false;
        }
        self.value = Some(value);
        true
    }
}

/// Two concurrent fetches that must both settle before the view leaves
/// `loading`; the first failure (left before right) wins
#[derive(Debug)]
pub struct Join<A, B> {
    generation: Ticket,
    left: Slot<A>,
    right: Slot<B>,
}

impl<A, B> Join<A, B> {
    pub fn new(generation: Ticket, left: Ticket, right: Ticket) -> Self {
        Self {
            generation,
            left: Slot::new(left),
            right: Slot::new(right),
        }
    }

    pub fn generation(&self) -> Ticket {
        self.generation
    }

    pub fn left_ticket(&self) -> Ticket {
        self.left.ticket
    }

    pub fn right_ticket(&self) -> Ticket {
        self.right.ticket
    }

    pub fn offer_left(&mut self, ticket: Ticket, value: Result<A, LoadFailure>) -> bool {
        self.left.offer(ticket, value)
    }

    pub fn offer_right(&mut self, ticket: Ticket, value: Result<B, LoadFailure>) -> bool {
        self.right.offer(ticket, value)
    }

    pub fn is_complete(&self) -> bool {
        self.left.value.is_some() && self.right.value.is_some()
    }

    /// Combined result once both sides have settled
    pub fn finish(self) -> Option<Result<(A, B), LoadFailure>> {
        match (self.left.value, self.right.value) {
            (Some(left), Some(right)) => Some(left.and_then(|l| right.map(|r| (l, r)))),
            _ => None,
        }
    }
}
