//! View state machines
//!
//! Every console view is a pure state machine: user input and call
//! outcomes go in, the next state is stored and a list of [`Effect`]s comes
//! out. Effects are performed by [`runtime::run`], which feeds call outcomes
//! back into the view. Nothing here touches the network directly.

pub mod fields;
pub mod lifecycle;
pub mod mutation;
pub mod runtime;

pub use fields::FieldErrors;
pub use lifecycle::{FetchState, Join, Lifecycle, LoadFailure};
pub use mutation::Mutation;
pub use runtime::{run, Screen};

use crate::api::{ApiCall, ApiOutcome, ApiReply};
use crate::navigation::Route;
use serde::{Deserialize, Serialize};

/// Message shown for any transport failure
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Outcome of one dispatched [`ApiCall`]
pub type CallOutcome = ApiOutcome<ApiReply>;

/// Identifies one outstanding call issued by a view
///
/// Outcomes carrying a ticket the view no longer waits for are dropped,
/// which is how late results for an abandoned activation are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Per-view ticket source
#[derive(Debug, Default)]
pub struct Tickets {
    issued: u64,
}

impl Tickets {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible message produced by a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Side effect requested by a view transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Call { ticket: Ticket, call: ApiCall },
    Navigate(Route),
    Notify(Notice),
}

impl Effect {
    pub fn call(ticket: Ticket, call: ApiCall) -> Self {
        Effect::Call { ticket, call }
    }
}

/// Count the network calls among `effects`
#[cfg(test)]
pub fn count_calls(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Call { .. }))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_are_unique_per_source() {
        let mut tickets = Tickets::default();
        let first = tickets.issue();
        let second = tickets.issue();

        assert_ne!(first, second);
    }

    #[test]
    fn test_count_calls() {
        let mut tickets = Tickets::default();
        let effects = vec![
            Effect::call(tickets.issue(), ApiCall::ListPlanets),
            Effect::Notify(Notice::success("ok")),
            Effect::call(tickets.issue(), ApiCall::ListSpacecraft),
            Effect::Navigate(Route::Fleet),
        ];

        assert_eq!(count_calls(&effects), 2);
    }
}
