/// Tool for editing habits
///
/// This module implements the habit_edit MCP tool. Omitted fields keep their
/// current value.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Recurrence};
use crate::tools::{parse_habit_id, recurrence_from};
use crate::{HabitTracker, ServerError};

/// Parameters for editing a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditHabitParams {
    /// ID of the habit to edit
    pub habit_id: String,
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New emoji
    #[serde(default)]
    pub emoji: Option<String>,
    /// New description (empty string clears it)
    #[serde(default)]
    pub description: Option<String>,
    /// Move the habit to this single day (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    /// Set to true to make the habit show every day from today on; false
    /// requires a `date`
    #[serde(default)]
    pub everyday: Option<bool>,
}

/// Response from editing a habit
#[derive(Debug, Serialize)]
pub struct EditHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Edit a habit's metadata or recurrence, keeping its completion history
pub fn edit_habit(
    tracker: &mut HabitTracker,
    params: EditHabitParams,
) -> Result<EditHabitResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let mut fields = tracker
        .habits()
        .get(&habit_id)
        .map(|h| h.fields())
        .ok_or(DomainError::HabitNotFound { habit_id })?;

    if let Some(name) = params.name {
        fields.name = name;
    }
    if let Some(emoji) = params.emoji {
        fields.emoji = emoji;
    }
    if let Some(description) = params.description {
        fields.description = description;
    }

    fields.recurrence = match (params.everyday, params.date.as_deref()) {
        (Some(true), Some(_)) => {
            return Err(DomainError::Validation {
                message: "A habit cannot be both everyday and on a single date".to_string(),
            }
            .into())
        }
        (Some(true), None) => Recurrence::Everyday,
        (Some(false), None) => {
            return Err(DomainError::Validation {
                message: "A habit that is not everyday needs a date".to_string(),
            }
            .into())
        }
        (_, Some(date)) => recurrence_from(Some(date))?,
        (_, None) => fields.recurrence,
    };

    tracker.edit_habit(&habit_id, fields)?;

    let label = tracker
        .habits()
        .get(&habit_id)
        .map(|h| h.label())
        .unwrap_or_default();

    Ok(EditHabitResponse {
        success: true,
        message: format!("✏️ Updated habit '{}'", label),
    })
}
