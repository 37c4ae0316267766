//! Console views
//!
//! Each view is a state machine driven by user actions and call outcomes.
//! Actions return the effects to perform; the runtime performs them and
//! hands the outcomes back through [`crate::flow::Screen`].

pub mod construction;
pub mod destroy;
pub mod fleet;
pub mod home;
pub mod planets;
pub mod spacecraft;

pub use construction::{BuildForm, ConstructionForm};
pub use fleet::FleetView;
pub use home::HomePage;
pub use planets::PlanetsView;
pub use spacecraft::SpacecraftView;
