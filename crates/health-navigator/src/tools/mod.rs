//! Navigator Tools
//!
//! Tool wrappers exposing the external health services and session
//! location state to agents.

mod guideline_search;
mod location;
mod medical_content;
mod travel_advisory;

pub use guideline_search::GuidelineSearchTool;
pub use location::{GetLocationTool, SaveLocationTool, LOCATION_NOT_SET, USER_LOCATION_KEY};
pub use medical_content::MedicalContentTool;
pub use travel_advisory::TravelAdvisoryTool;
