/// Daily completion ratios and the weekly average built from them

use serde::Serialize;

use crate::domain::{DateKey, HabitCollection};

/// Number of days covered by weekly figures, ending today inclusive
pub const WEEK_DAYS: i64 = 7;

/// Completion numbers for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStatistics {
    pub day: DateKey,
    /// Relevant habits completed on the day
    pub completed: usize,
    /// Habits visible on the day
    pub total: usize,
    /// 0 when nothing is scheduled, otherwise 100 × completed / total
    pub percentage: f64,
}

impl DayStatistics {
    /// True when at least one habit was scheduled and all of them were done
    pub fn is_fully_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

pub fn day_statistics(habits: &HabitCollection, day: &DateKey, today: &DateKey) -> DayStatistics {
    let relevant = habits.relevant(day, today);
    let total = relevant.len();
    let completed = relevant.iter().filter(|h| h.is_completed_on(day)).count();

    let percentage = if total == 0 {
        0.0
    } else {
        100.0 * completed as f64 / total as f64
    };

    DayStatistics {
        day: *day,
        completed,
        total,
        percentage,
    }
}

/// Completion percentage for `day`, unrounded
pub fn daily_percentage(habits: &HabitCollection, day: &DateKey, today: &DateKey) -> f64 {
    day_statistics(habits, day, today).percentage
}

/// Average percentage over the last seven days, counting only days above zero
///
/// A day where every scheduled habit was missed scores 0 and is skipped just
/// like a day with nothing scheduled.
pub fn weekly_average(habits: &HabitCollection, today: &DateKey) -> f64 {
    let (sum, days) = (0..WEEK_DAYS)
        .map(|offset| daily_percentage(habits, &today.add_days(-offset), today))
        .filter(|pct| *pct > 0.0)
        .fold((0.0, 0u32), |(sum, days), pct| (sum + pct, days + 1));

    if days == 0 {
        0.0
    } else {
        sum / days as f64
    }
}

/// Statistics for each of the last seven days, oldest first
pub fn completion_series(habits: &HabitCollection, today: &DateKey) -> Vec<DayStatistics> {
    (0..WEEK_DAYS)
        .rev()
        .map(|offset| day_statistics(habits, &today.add_days(-offset), today))
        .collect()
}
