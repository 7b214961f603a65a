/// Analytics engine for completion and mood statistics
///
/// Everything here is a pure computation over the habit collection and mood
/// map plus an explicit reference day. Missing data degrades to zero or
/// neutral values instead of raising errors.

pub mod completion;
pub mod mood;
pub mod streak;

pub use completion::{
    completion_series, daily_percentage, day_statistics, weekly_average, DayStatistics, WEEK_DAYS,
};
pub use mood::{most_common_label, most_common_mood, mood_trend, MoodPoint};
pub use streak::current_streak;

use serde::Serialize;

use crate::domain::{DateKey, HabitCollection, Mood, MoodMap};

/// Presentation-ready figures for the week ending today
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub today: DayStatistics,
    pub weekly_average: f64,
    pub current_streak: u32,
    /// Last seven days, oldest first
    pub completion_series: Vec<DayStatistics>,
    /// Last seven days, oldest first
    pub mood_trend: Vec<MoodPoint>,
    pub most_common_mood: Option<Mood>,
}

impl WeeklySummary {
    pub fn most_common_label(&self) -> &'static str {
        self.most_common_mood.map_or("No data", |m| m.label())
    }
}

/// Analytics engine for processing habit and mood data
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }

    /// Completion numbers for `day`
    pub fn statistics_for(
        &self,
        habits: &HabitCollection,
        day: &DateKey,
        today: &DateKey,
    ) -> DayStatistics {
        day_statistics(habits, day, today)
    }

    pub fn weekly_average(&self, habits: &HabitCollection, today: &DateKey) -> f64 {
        weekly_average(habits, today)
    }

    pub fn current_streak(&self, habits: &HabitCollection, today: &DateKey) -> u32 {
        current_streak(habits, today)
    }

    pub fn recent_mood_series(&self, moods: &MoodMap, today: &DateKey) -> Vec<MoodPoint> {
        mood_trend(moods, today)
    }

    /// All weekly figures in one pass
    pub fn summarize(
        &self,
        habits: &HabitCollection,
        moods: &MoodMap,
        today: &DateKey,
    ) -> WeeklySummary {
        let summary = WeeklySummary {
            today: day_statistics(habits, today, today),
            weekly_average: weekly_average(habits, today),
            current_streak: current_streak(habits, today),
            completion_series: completion_series(habits, today),
            mood_trend: mood_trend(moods, today),
            most_common_mood: most_common_mood(moods, today),
        };

        tracing::debug!(
            "Summary for {}: {}/{} today, weekly {:.1}%, streak {}",
            today,
            summary.today.completed,
            summary.today.total,
            summary.weekly_average,
            summary.current_streak
        );
        summary
    }
}
