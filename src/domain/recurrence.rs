/// Recurrence rules and the visibility decision
///
/// `is_visible_on` is the only place that decides whether a habit shows up on
/// a given day. Day lists and completion statistics both call it.

use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, Habit};

/// On which days a habit is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "date", rename_all = "snake_case")]
pub enum Recurrence {
    /// Today and every future day, never a past day
    Everyday,
    /// Exactly one day
    OnDate(DateKey),
}

impl Recurrence {
    pub fn is_everyday(&self) -> bool {
        matches!(self, Recurrence::Everyday)
    }

    /// The scheduled day for single-day habits
    pub fn custom_date(&self) -> Option<DateKey> {
        match self {
            Recurrence::Everyday => None,
            Recurrence::OnDate(date) => Some(*date),
        }
    }

    /// Whether this rule makes a habit show on `day`, given the current `today`
    pub fn is_active_on(&self, day: &DateKey, today: &DateKey) -> bool {
        match self {
            Recurrence::Everyday => !day.is_before(today),
            Recurrence::OnDate(date) => day.is_same_day(date),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Recurrence::Everyday => "every day".to_string(),
            Recurrence::OnDate(date) => format!("on {}", date),
        }
    }
}

/// Whether `habit` is shown on `day`
pub fn is_visible_on(habit: &Habit, day: &DateKey, today: &DateKey) -> bool {
    habit.recurrence.is_active_on(day, today)
}
