/// Habit entity and related functionality
///
/// This module defines the core Habit struct: what the user wants to do, on
/// which days it is active, and on which days it was done.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, DomainError, HabitId, Recurrence};

/// A habit the user tracks
///
/// Membership in `completed_days` is the only record of completion. A day may
/// stay in the set after the recurrence changes so that it no longer shows on
/// that day; history is never purged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    /// Session-scoped identifier (not persisted)
    pub id: HabitId,
    /// Display name (e.g., "Drink water")
    pub name: String,
    /// Emoji shown next to the name
    pub emoji: String,
    /// Free-form description, may be empty
    pub description: String,
    /// Which days the habit is active on
    pub recurrence: Recurrence,
    /// Days on which the habit was completed
    pub completed_days: BTreeSet<DateKey>,
}

/// The user-editable part of a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitFields {
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub recurrence: Recurrence,
}

impl HabitFields {
    pub fn new(
        name: impl Into<String>,
        emoji: impl Into<String>,
        description: impl Into<String>,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            description: description.into(),
            recurrence,
        }
    }

    /// Trimmed copy, validated against the creation rules
    fn validated(self) -> Result<Self, DomainError> {
        let name = self.name.trim().to_string();
        let emoji = self.emoji.trim().to_string();
        let description = self.description.trim().to_string();

        Habit::validate_name(&name)?;
        Habit::validate_emoji(&emoji)?;
        Habit::validate_storable("name", &name)?;
        Habit::validate_storable("emoji", &emoji)?;
        Habit::validate_storable("description", &description)?;

        Ok(Self {
            name,
            emoji,
            description,
            recurrence: self.recurrence,
        })
    }
}

/// Equality compares the persisted record and ignores the session id.
impl PartialEq for Habit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.emoji == other.emoji
            && self.description == other.description
            && self.recurrence == other.recurrence
            && self.completed_days == other.completed_days
    }
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// A single-day habit may not be scheduled before `today`.
    pub fn new(fields: HabitFields, today: &DateKey) -> Result<Self, DomainError> {
        let fields = fields.validated()?;
        Self::validate_recurrence(&fields.recurrence, today)?;

        Ok(Self {
            id: HabitId::new(),
            name: fields.name,
            emoji: fields.emoji,
            description: fields.description,
            recurrence: fields.recurrence,
            completed_days: BTreeSet::new(),
        })
    }

    /// Create a habit from existing data (used when loading from storage)
    ///
    /// No validation happens here; persisted history is taken as-is.
    pub fn from_existing(
        name: String,
        emoji: String,
        description: String,
        recurrence: Recurrence,
        completed_days: BTreeSet<DateKey>,
    ) -> Self {
        Self {
            id: HabitId::new(),
            name,
            emoji,
            description,
            recurrence,
            completed_days,
        }
    }

    /// Replace name, emoji, description and recurrence in place
    ///
    /// Completion history is kept. Moving the recurrence to a day before
    /// `today` is rejected; keeping an existing past date is allowed. On error
    /// the habit is left untouched.
    pub fn update(&mut self, fields: HabitFields, today: &DateKey) -> Result<(), DomainError> {
        let fields = fields.validated()?;
        if fields.recurrence != self.recurrence {
            Self::validate_recurrence(&fields.recurrence, today)?;
        }

        self.name = fields.name;
        self.emoji = fields.emoji;
        self.description = fields.description;
        self.recurrence = fields.recurrence;

        Ok(())
    }

    pub fn fields(&self) -> HabitFields {
        HabitFields::new(
            self.name.clone(),
            self.emoji.clone(),
            self.description.clone(),
            self.recurrence,
        )
    }

    pub fn is_completed_on(&self, day: &DateKey) -> bool {
        self.completed_days.contains(day)
    }

    /// Mark or unmark `day`; repeating the same call changes nothing
    pub fn set_completion(&mut self, day: DateKey, completed: bool) {
        if completed {
            self.completed_days.insert(day);
        } else {
            self.completed_days.remove(&day);
        }
    }

    /// Flip completion for `day`, returning the new state
    pub fn toggle_completion(&mut self, day: DateKey) -> bool {
        let completed = !self.is_completed_on(&day);
        self.set_completion(day, completed);
        completed
    }

    /// Total number of days this habit was completed
    pub fn completion_count(&self) -> usize {
        self.completed_days.len()
    }

    /// Display string like "💧 Drink"
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_emoji(emoji: &str) -> Result<(), DomainError> {
        if emoji.trim().is_empty() {
            return Err(DomainError::InvalidEmoji(
                "Habit emoji cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The flat storage format has no escaping, so its separators cannot
    /// appear inside free text.
    fn validate_storable(field: &str, value: &str) -> Result<(), DomainError> {
        if value.contains('|') || value.contains(";;;") {
            return Err(DomainError::Validation {
                message: format!("Habit {} cannot contain '|' or ';;;'", field),
            });
        }
        Ok(())
    }

    fn validate_recurrence(recurrence: &Recurrence, today: &DateKey) -> Result<(), DomainError> {
        if let Recurrence::OnDate(date) = recurrence {
            if date.is_before(today) {
                return Err(DomainError::PastDateNotAllowed { date: *date });
            }
        }
        Ok(())
    }
}
