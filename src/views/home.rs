//! Landing page content

use crate::models::group_thousands;
use serde::Serialize;

pub const EARTH_POPULATION_REMAINING: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub story: &'static str,
    pub features: Vec<Feature>,
    pub status: &'static str,
    pub population_remaining: String,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            title: "Space Travel Command Center",
            subtitle: "Evacuate Humanity. Explore the Solar System. Secure Our Future.",
            story: "In the not-so-distant future, Earth has become uninhabitable \
                    due to centuries of environmental degradation. As a commander, \
                    you hold the fate of humanity in your hands. Using cutting-edge \
                    spacecraft, you must evacuate Earth's remaining population to \
                    newly terraformed planets across our solar system.",
            features: vec![
                Feature {
                    icon: "🛸",
                    title: "Manage Fleet",
                    text: "View all spacecraft, their specifications, and current locations",
                },
                Feature {
                    icon: "🔧",
                    title: "Build & Destroy",
                    text: "Construct new spacecraft or decommission old ones as needed",
                },
                Feature {
                    icon: "🪐",
                    title: "Coordinate Transfers",
                    text: "Send spacecraft between planets to relocate populations",
                },
            ],
            status: "ONLINE",
            population_remaining: group_thousands(EARTH_POPULATION_REMAINING),
        }
    }
}
