//! Destroy flow pieces shared by the fleet list and the detail view

use crate::api::ApiReply;
use crate::flow::mutation::resolve;
use crate::flow::{CallOutcome, Notice, UNEXPECTED_ERROR};
use crate::models::{Spacecraft, SpacecraftId};
use tracing::{error, info};

pub const DESTROY_FAILED: &str = "Failed to destroy spacecraft. Please try again.";

/// The spacecraft a destroy flow is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyTarget {
    pub id: SpacecraftId,
    pub name: String,
}

impl DestroyTarget {
    pub fn of(spacecraft: &Spacecraft) -> Self {
        Self {
            id: spacecraft.id.clone(),
            name: spacecraft.name.clone(),
        }
    }

    /// Question the user must accept before anything is sent
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to destroy {}? This action cannot be undone.",
            self.name
        )
    }
}

/// Success notice, or the failure notice to show instead
pub fn settle(outcome: CallOutcome, target: &DestroyTarget) -> Result<Notice, Notice> {
    match resolve(outcome, "Destroy", DESTROY_FAILED)? {
        ApiReply::Destroyed => {
            info!("Spacecraft destroyed: {} (id: {})", target.name, target.id);
            Ok(Notice::success(format!(
                "{} has been destroyed successfully.",
                target.name
            )))
        }
        other => {
            error!("Destroy returned an unexpected reply: {:?}", other);
            Err(Notice::error(UNEXPECTED_ERROR))
        }
    }
}
