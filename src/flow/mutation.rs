//! Mutation phases shared by build, destroy and transfer
//!
//! `idle → (confirming) → submitting → idle`. Validation runs
//! synchronously before a flow leaves `idle`, so it has no phase of its
//! own. A flow carries a context `C` (what is being mutated) through the
//! phases so the success and failure handlers can name it.

use super::{CallOutcome, Notice, Ticket, UNEXPECTED_ERROR};
use crate::api::{ApiReply, ApiResponse};
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<C> {
    Idle,
    Confirming(C),
    Submitting { ticket: Ticket, context: C },
}

#[derive(Debug)]
pub struct Mutation<C> {
    phase: Phase<C>,
}

impl<C> Default for Mutation<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Mutation<C> {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn phase(&self) -> &Phase<C> {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// Context awaiting the user's accept/decline
    pub fn pending_confirmation(&self) -> Option<&C> {
        match &self.phase {
            Phase::Confirming(context) => Some(context),
            _ => None,
        }
    }

    /// Ask the user to confirm; only possible from `idle`
    pub fn ask(&mut self, context: C) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = Phase::Confirming(context);
        true
    }

    /// Back to `idle` without any call
    pub fn decline(&mut self) -> Option<C> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Confirming(context) => Some(context),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Accepted confirmation moves straight into `submitting`
    pub fn confirm(&mut self, ticket: Ticket) -> Option<&C> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Confirming(context) => {
                self.phase = Phase::Submitting { ticket, context };
            }
            other => {
                self.phase = other;
                return None;
            }
        }
        match &self.phase {
            Phase::Submitting { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Submit without a confirmation step; only possible from `idle`
    pub fn submit(&mut self, ticket: Ticket, context: C) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = Phase::Submitting { ticket, context };
        true
    }

    /// Leave `submitting` when the outcome for `ticket` arrives
    pub fn finish(&mut self, ticket: Ticket) -> Option<C> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Submitting {
                ticket: awaited,
                context,
            } if awaited == ticket => Some(context),
            other => {
                self.phase = other;
                None
            }
        }
    }

    pub fn awaits(&self, ticket: Ticket) -> bool {
        matches!(&self.phase, Phase::Submitting { ticket: awaited, .. } if *awaited == ticket)
    }
}

/// Split a mutation outcome into the reply or the notice to show
///
/// Service rejections surface the server message, or `fallback` when it
/// sent none; transport failures surface the generic message.
pub fn resolve(outcome: CallOutcome, flow: &str, fallback: &str) -> Result<ApiReply, Notice> {
    match outcome {
        Ok(ApiResponse::Data(reply)) => Ok(reply),
        Ok(ApiResponse::Failure(failure)) => {
            warn!(
                "{} rejected by service ({}): {}",
                flow,
                failure.status,
                failure.message.as_deref().unwrap_or("no message")
            );
            Err(Notice::error(failure.message_or(fallback)))
        }
        Err(e) => {
            error!("{} failed: {}", flow, e);
            Err(Notice::error(UNEXPECTED_ERROR))
        }
    }
}
