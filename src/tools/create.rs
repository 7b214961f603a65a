/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::HabitFields;
use crate::tools::recurrence_from;
use crate::{HabitTracker, ServerError};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Emoji shown next to the habit
    pub emoji: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Single day (YYYY-MM-DD) the habit is scheduled on; omit for every day from today on
    #[serde(default)]
    pub date: Option<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: Option<String>,
    pub message: String,
}

/// Create a new habit in the tracker
pub fn create_habit(
    tracker: &mut HabitTracker,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ServerError> {
    let recurrence = recurrence_from(params.date.as_deref())?;
    let fields = HabitFields::new(
        params.name,
        params.emoji,
        params.description.unwrap_or_default(),
        recurrence,
    );

    let habit_id = tracker.create_habit(fields)?;
    let label = tracker
        .habits()
        .get(&habit_id)
        .map(|h| h.label())
        .unwrap_or_default();

    Ok(CreateHabitResponse {
        success: true,
        habit_id: Some(habit_id.to_string()),
        message: format!("✅ Created habit '{}' ({})", label, recurrence.display_name()),
    })
}
