/// MCP tools for habit and mood management
///
/// This module contains all the tools that external clients can call to
/// interact with the tracker. Each tool takes the session object, runs one
/// operation against it and returns a serializable response with a
/// human-readable message.

pub mod create;
pub mod delete;
pub mod list;
pub mod log;
pub mod mood;
pub mod status;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use list::*;
pub use log::*;
pub use mood::*;
pub use status::*;
pub use update::*;

use crate::domain::{DateKey, DomainError, HabitId, Recurrence};
use crate::HabitTracker;

/// Text shown to the client for a successful tool response
pub trait ToolOutput {
    fn into_message(self) -> String;
}

macro_rules! message_output {
    ($($response:ty),* $(,)?) => {
        $(
            impl ToolOutput for $response {
                fn into_message(self) -> String {
                    self.message
                }
            }
        )*
    };
}

message_output!(
    EditHabitResponse,
    DeleteHabitResponse,
    SetCompletionResponse,
    ListHabitsResponse,
    StatsResponse,
    LogMoodResponse,
    DeleteMoodResponse,
    MoodTrendResponse,
    MoodCalendarResponse,
);

impl ToolOutput for CreateHabitResponse {
    fn into_message(self) -> String {
        match self.habit_id {
            Some(habit_id) => format!("{}\nHabit ID: {}", self.message, habit_id),
            None => self.message,
        }
    }
}

/// Parse a habit id handed back by the client
pub(crate) fn parse_habit_id(value: &str) -> Result<HabitId, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation {
            message: "Habit ID cannot be empty".to_string(),
        });
    }

    HabitId::from_string(value).map_err(|_| DomainError::Validation {
        message: format!("Invalid habit ID format: '{}'", value),
    })
}

/// The given `YYYY-MM-DD` day, or the tracker's today when omitted
pub(crate) fn day_or_today(tracker: &HabitTracker, date: Option<&str>) -> Result<DateKey, DomainError> {
    match date {
        Some(value) => value.parse(),
        None => Ok(tracker.today()),
    }
}

/// `Everyday` unless a single day is given
pub(crate) fn recurrence_from(date: Option<&str>) -> Result<Recurrence, DomainError> {
    match date {
        Some(value) => Ok(Recurrence::OnDate(value.parse()?)),
        None => Ok(Recurrence::Everyday),
    }
}
