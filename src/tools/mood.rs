/// Tools for the mood journal
///
/// This module implements mood_log, mood_delete, mood_trend and
/// mood_calendar.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::MoodPoint;
use crate::domain::{month_grid, DateKey, Mood, MoodEntry};
use crate::tools::day_or_today;
use crate::{HabitTracker, ServerError};

/// Parameters for logging a mood
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMoodParams {
    /// One of Excellent, Great, Good, Neutral, Poor, Bad, Awful
    pub mood: String,
    /// Optional note on why
    #[serde(default)]
    pub reason: Option<String>,
    /// Day of the mood (YYYY-MM-DD, defaults to today; future days are refused)
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub success: bool,
    pub date: DateKey,
    pub entry: MoodEntry,
    pub message: String,
}

/// Parameters for deleting a mood
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteMoodParams {
    /// Day to clear (YYYY-MM-DD, defaults to today)
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteMoodResponse {
    pub success: bool,
    pub removed: bool,
    pub message: String,
}

/// Parameters for the mood trend (none)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct MoodTrendParams {}

#[derive(Debug, Serialize)]
pub struct MoodTrendResponse {
    pub points: Vec<MoodPoint>,
    pub most_common: String,
    pub message: String,
}

/// Parameters for the month calendar
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MoodCalendarParams {
    /// Year, defaults to the current one
    #[serde(default)]
    pub year: Option<i32>,
    /// Month 1-12, defaults to the current one
    #[serde(default)]
    pub month: Option<u32>,
}

/// A day cell of the calendar grid
#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: DateKey,
    pub emoji: Option<String>,
    pub is_future: bool,
}

#[derive(Debug, Serialize)]
pub struct MoodCalendarResponse {
    pub year: i32,
    pub month: u32,
    /// Sunday-first cells; `None` pads the first week
    pub cells: Vec<Option<CalendarDay>>,
    pub message: String,
}

pub fn log_mood(tracker: &mut HabitTracker, params: LogMoodParams) -> Result<LogMoodResponse, ServerError> {
    let mood = Mood::from_label(&params.mood)?;
    let day = day_or_today(tracker, params.date.as_deref())?;
    let entry = tracker.log_mood(day, mood, params.reason.as_deref().unwrap_or(""))?;

    let message = format!(
        "{} Logged mood '{}' for {}",
        entry.emoji,
        mood.label(),
        day.relative_label(&tracker.today())
    );

    Ok(LogMoodResponse {
        success: true,
        date: day,
        entry,
        message,
    })
}

pub fn delete_mood(
    tracker: &mut HabitTracker,
    params: DeleteMoodParams,
) -> Result<DeleteMoodResponse, ServerError> {
    let day = day_or_today(tracker, params.date.as_deref())?;
    let removed = tracker.remove_mood(&day)?.is_some();

    let message = if removed {
        format!("🗑️ Removed mood for {}", day.relative_label(&tracker.today()))
    } else {
        format!("No mood logged for {}", day.relative_label(&tracker.today()))
    };

    Ok(DeleteMoodResponse {
        success: true,
        removed,
        message,
    })
}

pub fn mood_trend(tracker: &HabitTracker, _params: MoodTrendParams) -> Result<MoodTrendResponse, ServerError> {
    let summary = tracker.summary();

    let chart = summary
        .mood_trend
        .iter()
        .map(|p| {
            let emoji = p.mood.map_or("·", |m| m.emoji());
            format!("{} {} ({})", p.day, emoji, p.score)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let most_common = summary.most_common_label().to_string();
    let message = format!("💭 Mood, last 7 days\n{}\n\nMost common: {}", chart, most_common);

    Ok(MoodTrendResponse {
        points: summary.mood_trend,
        most_common,
        message,
    })
}

pub fn mood_calendar(
    tracker: &HabitTracker,
    params: MoodCalendarParams,
) -> Result<MoodCalendarResponse, ServerError> {
    let today = tracker.today();
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());

    let cells: Vec<Option<CalendarDay>> = month_grid(year, month)?
        .into_iter()
        .map(|cell| {
            cell.map(|date| CalendarDay {
                date,
                emoji: tracker.moods().get(&date).map(|e| e.emoji.clone()),
                is_future: today.is_before(&date),
            })
        })
        .collect();

    let logged = cells
        .iter()
        .flatten()
        .filter(|c| c.emoji.is_some())
        .count();

    let weeks = cells
        .chunks(7)
        .map(|week| {
            week.iter()
                .map(|cell| match cell {
                    None => "  ".to_string(),
                    Some(day) => day
                        .emoji
                        .clone()
                        .unwrap_or_else(|| format!("{:02}", day.date.day())),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let message = format!(
        "🗓️ {}-{:02}: {} mood{} logged\nSu Mo Tu We Th Fr Sa\n{}",
        year,
        month,
        logged,
        if logged == 1 { "" } else { "s" },
        weeks
    );

    Ok(MoodCalendarResponse {
        year,
        month,
        cells,
        message,
    })
}
