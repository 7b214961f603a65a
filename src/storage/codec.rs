/// Flat-string codec for the habit list and the mood map
///
/// Habits are stored as one string: records joined by `;;;`, each record being
/// `name|emoji|description|isEveryday|customDateOrNull|completedDays`.
///
/// Two day formats coexist and are kept as they are for compatibility with
/// existing data:
/// - the custom date is `year-month-day` with a zero-based month and no padding
///   (`2024-0-5` is 5 January 2024);
/// - completed days are `yyyy-MM-dd` with a one-based month.
///
/// Separators are not escaped. Free text containing `|` or `;;;` would corrupt
/// the record, which is why habit validation rejects it.
///
/// Decoding is lenient: a malformed habit record or mood entry is dropped with
/// a warning and the rest of the data loads.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DateKey, Habit, HabitCollection, Mood, MoodEntry, MoodMap, Recurrence};

pub const HABIT_SEPARATOR: &str = ";;;";
pub const FIELD_SEPARATOR: char = '|';
pub const DAY_SEPARATOR: char = ',';
const NULL_DATE: &str = "null";

/// A persisted record that could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Habit record has {found} fields, expected at least 5")]
    MissingFields { found: usize },

    #[error("Invalid custom date '{value}': {reason}")]
    InvalidCustomDate { value: String, reason: String },

    #[error("Invalid completed day '{0}'")]
    InvalidCompletedDay(String),

    #[error("Habit '{name}' is not everyday but has no custom date")]
    MissingCustomDate { name: String },

    #[error("Invalid mood entry for '{key}': {reason}")]
    InvalidMoodEntry { key: String, reason: String },

    #[error("Invalid mood map: {0}")]
    MoodMap(String),
}

/// `year-month0-day` form used for custom dates and mood map keys
pub fn encode_custom_date(date: &DateKey) -> String {
    format!("{}-{}-{}", date.year(), date.month() - 1, date.day())
}

pub fn decode_custom_date(value: &str) -> Result<DateKey, DecodeError> {
    let invalid = |reason: String| DecodeError::InvalidCustomDate {
        value: value.to_string(),
        reason,
    };

    let parts: Vec<&str> = value.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(invalid("expected year-month-day".to_string()));
    }

    let year: i32 = parts[0].parse().map_err(|_| invalid("bad year".to_string()))?;
    let month0: u32 = parts[1].parse().map_err(|_| invalid("bad month".to_string()))?;
    let day: u32 = parts[2].parse().map_err(|_| invalid("bad day".to_string()))?;

    let month = month0
        .checked_add(1)
        .ok_or_else(|| invalid("bad month".to_string()))?;

    DateKey::from_parts(year, month, day).map_err(|e| invalid(e.to_string()))
}

pub fn encode_habit(habit: &Habit) -> String {
    let custom_date = habit
        .recurrence
        .custom_date()
        .map(|d| encode_custom_date(&d))
        .unwrap_or_else(|| NULL_DATE.to_string());

    let completed_days = habit
        .completed_days
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}|{}|{}|{}|{}|{}",
        habit.name,
        habit.emoji,
        habit.description,
        habit.recurrence.is_everyday(),
        custom_date,
        completed_days
    )
}

/// Decode one habit record
///
/// The sixth field is optional and empty tokens in it are skipped. A custom
/// date is parsed even for everyday habits, and a bad one rejects the record.
/// A record that is not everyday and has a `null` date is rejected too; it
/// could never be shown, and the next save of the list drops it and its
/// completion history for good.
pub fn decode_habit(record: &str) -> Result<Habit, DecodeError> {
    let parts: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if parts.len() < 5 {
        return Err(DecodeError::MissingFields { found: parts.len() });
    }

    let name = parts[0].to_string();
    let is_everyday = parts[3].trim().eq_ignore_ascii_case("true");

    let custom_date = match parts[4].trim() {
        NULL_DATE => None,
        value => Some(decode_custom_date(value)?),
    };

    let recurrence = match (is_everyday, custom_date) {
        (true, _) => Recurrence::Everyday,
        (false, Some(date)) => Recurrence::OnDate(date),
        (false, None) => return Err(DecodeError::MissingCustomDate { name }),
    };

    let mut completed_days = BTreeSet::new();
    if let Some(days) = parts.get(5) {
        for token in days.split(DAY_SEPARATOR).map(str::trim).filter(|t| !t.is_empty()) {
            let day: DateKey = token
                .parse()
                .map_err(|_| DecodeError::InvalidCompletedDay(token.to_string()))?;
            completed_days.insert(day);
        }
    }

    Ok(Habit::from_existing(
        name,
        parts[1].to_string(),
        parts[2].to_string(),
        recurrence,
        completed_days,
    ))
}

pub fn encode_habits(habits: &HabitCollection) -> String {
    habits
        .iter()
        .map(encode_habit)
        .collect::<Vec<_>>()
        .join(HABIT_SEPARATOR)
}

/// Decode the whole habit list, dropping records that fail
pub fn decode_habits(encoded: &str) -> HabitCollection {
    if encoded.is_empty() {
        return HabitCollection::new();
    }

    let habits = encoded
        .split(HABIT_SEPARATOR)
        .enumerate()
        .filter_map(|(index, record)| match decode_habit(record) {
            Ok(habit) => Some(habit),
            Err(e) => {
                tracing::warn!("Dropping habit record {}: {}", index, e);
                None
            }
        })
        .collect();

    HabitCollection::from_habits(habits)
}

/// Stored shape of a mood entry; the mood stays a label so that an unknown
/// one only drops its own entry
#[derive(Debug, Serialize, Deserialize)]
struct StoredMoodEntry {
    mood: String,
    #[serde(default)]
    emoji: String,
    #[serde(default)]
    reason: String,
}

/// JSON object keyed by `year-month0-day`
pub fn encode_mood_map(moods: &MoodMap) -> Result<String, serde_json::Error> {
    let stored: BTreeMap<String, StoredMoodEntry> = moods
        .iter()
        .map(|(day, entry)| {
            (
                encode_custom_date(day),
                StoredMoodEntry {
                    mood: entry.mood.label().to_string(),
                    emoji: entry.emoji.clone(),
                    reason: entry.reason.clone(),
                },
            )
        })
        .collect();

    serde_json::to_string(&stored)
}

fn decode_mood_entry(key: &str, stored: StoredMoodEntry) -> Result<(DateKey, MoodEntry), DecodeError> {
    let invalid = |reason: String| DecodeError::InvalidMoodEntry {
        key: key.to_string(),
        reason,
    };

    let day = decode_custom_date(key).map_err(|e| invalid(e.to_string()))?;
    let mood = Mood::from_label(&stored.mood).map_err(|e| invalid(e.to_string()))?;
    let emoji = if stored.emoji.trim().is_empty() {
        mood.emoji().to_string()
    } else {
        stored.emoji
    };

    Ok((
        day,
        MoodEntry {
            mood,
            emoji,
            reason: stored.reason,
        },
    ))
}

/// Decode the mood map, dropping entries that fail
///
/// Text that is not a JSON object at all yields an empty map.
pub fn decode_mood_map(encoded: &str) -> MoodMap {
    if encoded.trim().is_empty() {
        return MoodMap::new();
    }

    let stored: BTreeMap<String, StoredMoodEntry> = match serde_json::from_str(encoded) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("{}", DecodeError::MoodMap(e.to_string()));
            return MoodMap::new();
        }
    };

    let entries = stored
        .into_iter()
        .filter_map(|(key, entry)| match decode_mood_entry(&key, entry) {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::warn!("Dropping mood entry: {}", e);
                None
            }
        })
        .collect();

    MoodMap::from_entries(entries)
}
