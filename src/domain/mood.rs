/// Daily mood entries
///
/// At most one entry per day, kept independently of habits. Only the
/// statistics engine reads them back for trend aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, DomainError};

/// The fixed seven-level mood scale, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Excellent,
    Great,
    Good,
    Neutral,
    Poor,
    Bad,
    Awful,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Excellent,
        Mood::Great,
        Mood::Good,
        Mood::Neutral,
        Mood::Poor,
        Mood::Bad,
        Mood::Awful,
    ];

    /// Score used when a day has no entry
    pub const NEUTRAL_SCORE: u8 = 4;

    /// Chart score, Excellent = 7 down to Awful = 1
    pub fn score(&self) -> u8 {
        match self {
            Mood::Excellent => 7,
            Mood::Great => 6,
            Mood::Good => 5,
            Mood::Neutral => 4,
            Mood::Poor => 3,
            Mood::Bad => 2,
            Mood::Awful => 1,
        }
    }

    pub fn from_score(score: u8) -> Option<Mood> {
        Mood::ALL.iter().copied().find(|m| m.score() == score)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Excellent => "Excellent",
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Neutral => "Neutral",
            Mood::Poor => "Poor",
            Mood::Bad => "Bad",
            Mood::Awful => "Awful",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Excellent => "😄",
            Mood::Great => "😊",
            Mood::Good => "🙂",
            Mood::Neutral => "😐",
            Mood::Poor => "😟",
            Mood::Bad => "😢",
            Mood::Awful => "😫",
        }
    }

    /// Case-insensitive lookup by label
    pub fn from_label(label: &str) -> Result<Mood, DomainError> {
        let wanted = label.trim();
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownMood(label.to_string()))
    }
}

/// One day's mood record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: Mood,
    pub emoji: String,
    pub reason: String,
}

impl MoodEntry {
    pub fn new(mood: Mood, reason: impl Into<String>) -> Self {
        Self {
            mood,
            emoji: mood.emoji().to_string(),
            reason: reason.into().trim().to_string(),
        }
    }
}

/// Day-keyed mood entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoodMap {
    entries: BTreeMap<DateKey, MoodEntry>,
}

impl MoodMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<DateKey, MoodEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, day: &DateKey) -> Option<&MoodEntry> {
        self.entries.get(day)
    }

    /// Record the mood for `day`, replacing any earlier entry
    ///
    /// Days after `today` cannot have a mood yet.
    pub fn log(
        &mut self,
        day: DateKey,
        mood: Mood,
        reason: &str,
        today: &DateKey,
    ) -> Result<&MoodEntry, DomainError> {
        if today.is_before(&day) {
            return Err(DomainError::FutureMoodNotAllowed { date: day });
        }

        tracing::debug!("Logged mood {} for {}", mood.label(), day);
        self.entries.insert(day, MoodEntry::new(mood, reason));
        Ok(&self.entries[&day])
    }

    /// Delete the entry for `day`; missing entries are a no-op
    pub fn remove(&mut self, day: &DateKey) -> Option<MoodEntry> {
        self.entries.remove(day)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &MoodEntry)> {
        self.entries.iter()
    }
}
