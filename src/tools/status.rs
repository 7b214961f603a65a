/// Tool for completion statistics
///
/// This module implements the habit_stats MCP tool: the numbers for one day
/// plus the weekly figures ending today.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{DayStatistics, WeeklySummary};
use crate::tools::day_or_today;
use crate::{HabitTracker, ServerError};

/// Parameters for completion statistics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatsParams {
    /// Day to report on (YYYY-MM-DD, defaults to today)
    #[serde(default)]
    pub date: Option<String>,
}

/// Response with completion statistics
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub day: DayStatistics,
    pub summary: WeeklySummary,
    pub message: String,
}

pub fn get_statistics(
    tracker: &HabitTracker,
    params: StatsParams,
) -> Result<StatsResponse, ServerError> {
    let day = day_or_today(tracker, params.date.as_deref())?;
    let stats = tracker.statistics_for(&day);
    let summary = tracker.summary();

    let series = summary
        .completion_series
        .iter()
        .map(|s| format!("{:.0}%", s.percentage))
        .collect::<Vec<_>>()
        .join(" → ");

    let message = format!(
        "📊 **{}**: {}/{} done ({:.1}%)\n📈 Weekly average: {:.1}%\n🔥 Current streak: {} day{}\n🗓️ Last 7 days: {}",
        day.relative_label(&tracker.today()),
        stats.completed,
        stats.total,
        stats.percentage,
        summary.weekly_average,
        summary.current_streak,
        if summary.current_streak == 1 { "" } else { "s" },
        series
    );

    Ok(StatsResponse {
        day: stats,
        summary,
        message,
    })
}
