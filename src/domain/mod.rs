/// Domain module containing core business logic and data types
///
/// This module defines the core entities (DateKey, Habit, HabitCollection,
/// MoodEntry) and their validation rules. These types represent the
/// fundamental concepts in our habit tracking system.

pub mod collection;
pub mod date;
pub mod habit;
pub mod mood;
pub mod recurrence;
pub mod types;

// Re-export public types for easy access
pub use collection::*;
pub use date::*;
pub use habit::*;
pub use mood::*;
pub use recurrence::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
///
/// Every variant is raised before any mutation, so the collection or mood map
/// is unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid habit emoji: {0}")]
    InvalidEmoji(String),

    #[error("Cannot schedule a habit on past date {date}")]
    PastDateNotAllowed { date: DateKey },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Cannot log a mood for future date {date}")]
    FutureMoodNotAllowed { date: DateKey },

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("Unknown mood '{0}'. Valid options: Excellent, Great, Good, Neutral, Poor, Bad, Awful")]
    UnknownMood(String),
}
