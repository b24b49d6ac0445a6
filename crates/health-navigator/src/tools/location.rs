//! Location Tools
//!
//! Save and recall the user's home location through session state. Each
//! instance is bound to one session key at construction time.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, SessionKey, SessionService, Tool, ToolCall, ToolResult, ToolSchema,
};

/// Session state key holding the user's location
pub const USER_LOCATION_KEY: &str = "user_location";

/// Sentinel returned when no location has been saved yet
pub const LOCATION_NOT_SET: &str = "NOT_SET";

/// Tool that saves the user's location into session state
pub struct SaveLocationTool {
    sessions: Arc<SessionService>,
    key: SessionKey,
}

impl SaveLocationTool {
    pub fn new(sessions: Arc<SessionService>, key: SessionKey) -> Self {
        Self { sessions, key }
    }
}

#[async_trait]
impl Tool for SaveLocationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "save_location".into(),
            description: "Save the user's home location (city and/or country) so later answers can be tailored to it. Call this when the user mentions where they live.".into(),
            parameters: vec![ParameterSchema::required_string(
                "location",
                "The user's location, e.g. 'Nairobi, Kenya'",
            )],
            category: Some("session".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let location = call.str_arg("location").unwrap_or_default().trim().to_string();

        if location.is_empty() {
            return Ok(ToolResult::failure(
                "save_location",
                "Error: no location was provided.",
            ));
        }

        self.sessions
            .set_state(&self.key, USER_LOCATION_KEY, location.clone());

        tracing::debug!(session = %self.key, location = %location, "saved user location");

        Ok(ToolResult::success(
            "save_location",
            format!("Saved location: {}", location),
        ))
    }
}

/// Tool that reads the user's saved location from session state
pub struct GetLocationTool {
    sessions: Arc<SessionService>,
    key: SessionKey,
}

impl GetLocationTool {
    pub fn new(sessions: Arc<SessionService>, key: SessionKey) -> Self {
        Self { sessions, key }
    }
}

#[async_trait]
impl Tool for GetLocationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_location".into(),
            description: "Get the user's saved home location. Returns NOT_SET if no location has been saved.".into(),
            parameters: vec![],
            category: Some("session".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let location = self
            .sessions
            .get_state(&self.key, USER_LOCATION_KEY)
            .unwrap_or_else(|| LOCATION_NOT_SET.to_string());

        Ok(ToolResult::success("get_location", location))
    }
}
