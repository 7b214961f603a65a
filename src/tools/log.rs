/// Tool for marking habit completions
///
/// This module implements the habit_set_completion MCP tool. With an explicit
/// `completed` flag the call is idempotent; without one it toggles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::{day_or_today, parse_habit_id};
use crate::{HabitTracker, ServerError};

/// Parameters for marking a habit complete or incomplete
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetCompletionParams {
    /// ID of the habit
    pub habit_id: String,
    /// Day to mark (YYYY-MM-DD, defaults to today)
    #[serde(default)]
    pub date: Option<String>,
    /// true = done, false = not done; omit to toggle
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Response from marking a habit
#[derive(Debug, Serialize)]
pub struct SetCompletionResponse {
    pub success: bool,
    pub completed: bool,
    pub day_percentage: f64,
    pub message: String,
}

pub fn set_completion(
    tracker: &mut HabitTracker,
    params: SetCompletionParams,
) -> Result<SetCompletionResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let day = day_or_today(tracker, params.date.as_deref())?;

    let completed = match params.completed {
        Some(completed) => {
            tracker.set_completion(&habit_id, day, completed)?;
            completed
        }
        None => tracker.toggle_completion(&habit_id, day)?,
    };

    let label = tracker
        .habits()
        .get(&habit_id)
        .map(|h| h.label())
        .unwrap_or_default();
    let stats = tracker.statistics_for(&day);
    let when = day.relative_label(&tracker.today());

    let message = if completed {
        format!(
            "🔥 Marked '{}' done for {} ({}/{} complete)",
            label, when, stats.completed, stats.total
        )
    } else {
        format!(
            "↩️ Marked '{}' not done for {} ({}/{} complete)",
            label, when, stats.completed, stats.total
        )
    };

    Ok(SetCompletionResponse {
        success: true,
        completed,
        day_percentage: stats.percentage,
        message,
    })
}
