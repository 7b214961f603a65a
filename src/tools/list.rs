/// Tool for listing the habits of one day
///
/// This module implements the habit_list MCP tool: the habits visible on the
/// selected day with their completion marks, plus the week strip around it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, Habit};
use crate::tools::day_or_today;
use crate::{HabitTracker, ServerError};

/// Parameters for listing habits
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Day to list (YYYY-MM-DD, defaults to today)
    #[serde(default)]
    pub date: Option<String>,
}

/// One habit row of the day list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub recurrence: String,
    pub completed: bool,
    pub total_completions: usize,
}

/// One cell of the week strip
#[derive(Debug, Serialize)]
pub struct StripDay {
    pub date: DateKey,
    pub label: String,
    pub selected: bool,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub date: DateKey,
    pub label: String,
    pub week: Vec<StripDay>,
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

impl HabitSummary {
    fn from_habit(habit: &Habit, day: &DateKey) -> Self {
        Self {
            habit_id: habit.id.to_string(),
            name: habit.name.clone(),
            emoji: habit.emoji.clone(),
            description: habit.description.clone(),
            recurrence: habit.recurrence.display_name(),
            completed: habit.is_completed_on(day),
            total_completions: habit.completion_count(),
        }
    }
}

pub fn list_habits(
    tracker: &HabitTracker,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ServerError> {
    let today = tracker.today();
    let day = day_or_today(tracker, params.date.as_deref())?;
    let label = day.relative_label(&today);

    let habits: Vec<HabitSummary> = tracker
        .habits_for_day(&day)
        .into_iter()
        .map(|h| HabitSummary::from_habit(h, &day))
        .collect();

    let week = day
        .week_strip()
        .into_iter()
        .map(|d| StripDay {
            date: d,
            label: d.relative_label(&today),
            selected: d.is_same_day(&day),
        })
        .collect();

    let message = if habits.is_empty() {
        format!("No habits for {}. Create one to get started!", label)
    } else {
        let done = habits.iter().filter(|h| h.completed).count();
        let rows = habits
            .iter()
            .map(|h| {
                format!(
                    "{} {} {}  ({})\n   ID: {}",
                    if h.completed { "✅" } else { "⬜" },
                    h.emoji,
                    h.name,
                    h.recurrence,
                    h.habit_id
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "📋 **{}** ({}/{} done)\n\n{}",
            label,
            done,
            habits.len(),
            rows
        )
    };

    Ok(ListHabitsResponse {
        date: day,
        label,
        week,
        habits,
        message,
    })
}
