/// Mood trend aggregation over the last week

use serde::Serialize;

use crate::analytics::completion::WEEK_DAYS;
use crate::domain::{DateKey, Mood, MoodMap};

/// One point of the mood chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodPoint {
    pub day: DateKey,
    /// 1..=7, or the neutral 4 when no entry exists
    pub score: u8,
    pub mood: Option<Mood>,
}

/// Scores for the last seven days, oldest to newest
///
/// Days without an entry score as Neutral so the series has no gaps.
pub fn mood_trend(moods: &MoodMap, today: &DateKey) -> Vec<MoodPoint> {
    (0..WEEK_DAYS)
        .rev()
        .map(|offset| {
            let day = today.add_days(-offset);
            let mood = moods.get(&day).map(|entry| entry.mood);
            MoodPoint {
                day,
                score: mood.map_or(Mood::NEUTRAL_SCORE, |m| m.score()),
                mood,
            }
        })
        .collect()
}

/// Most frequent mood among the last seven days that have an entry
///
/// Days are visited from today backward; on a tie the mood seen first wins.
pub fn most_common_mood(moods: &MoodMap, today: &DateKey) -> Option<Mood> {
    let mut counts: Vec<(Mood, usize)> = Vec::new();

    for offset in 0..WEEK_DAYS {
        if let Some(entry) = moods.get(&today.add_days(-offset)) {
            match counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.mood, 1)),
            }
        }
    }

    let mut best: Option<(Mood, usize)> = None;
    for (mood, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}

/// Label for [`most_common_mood`], "No data" when the week is empty
pub fn most_common_label(moods: &MoodMap, today: &DateKey) -> String {
    most_common_mood(moods, today)
        .map(|m| m.label().to_string())
        .unwrap_or_else(|| "No data".to_string())
}
