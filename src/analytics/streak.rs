/// Current streak of fully completed days

use crate::analytics::completion::day_statistics;
use crate::domain::{DateKey, HabitCollection};

/// Consecutive fully completed days, walking backward from `today`
///
/// The walk stops at the first day that is not at 100%. A day with nothing
/// scheduled scores 0, so it ends the streak as well.
pub fn current_streak(habits: &HabitCollection, today: &DateKey) -> u32 {
    let mut streak = 0;
    let mut checking = *today;

    loop {
        if !day_statistics(habits, &checking, today).is_fully_complete() {
            break;
        }
        streak += 1;

        let previous = checking.add_days(-1);
        if previous == checking {
            break;
        }
        checking = previous;
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Habit, HabitFields, Recurrence};

    fn day(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::from_parts(y, m, d).unwrap()
    }

    fn once(on: DateKey, done: bool) -> Habit {
        let mut habit =
            Habit::new(HabitFields::new("Once", "📌", "", Recurrence::OnDate(on)), &on).unwrap();
        habit.set_completion(on, done);
        habit
    }

    fn everyday(today: &DateKey) -> Habit {
        Habit::new(HabitFields::new("Walk", "🚶", "", Recurrence::Everyday), today).unwrap()
    }

    #[test]
    fn test_no_habits_no_streak() {
        let today = day(2024, 10, 5);
        assert_eq!(current_streak(&HabitCollection::new(), &today), 0);
    }

    #[test]
    fn test_streak_of_three_then_missed_day() {
        let today = day(2024, 10, 5);
        let mut walk = everyday(&today);
        walk.set_completion(today, true);

        let habits = HabitCollection::from_habits(vec![
            walk,
            once(today.add_days(-1), true),
            once(today.add_days(-2), true),
            once(today.add_days(-3), false),
        ]);

        assert_eq!(current_streak(&habits, &today), 3);
    }

    #[test]
    fn test_everyday_history_does_not_extend_streak() {
        // Everyday habits are hidden on past days, so those days score 0
        let today = day(2024, 10, 5);
        let mut walk = everyday(&today);
        walk.set_completion(today, true);
        walk.set_completion(today.add_days(-1), true);
        walk.set_completion(today.add_days(-2), true);

        let habits = HabitCollection::from_habits(vec![walk]);
        assert_eq!(current_streak(&habits, &today), 1);
    }

    #[test]
    fn test_gap_day_breaks_streak() {
        let today = day(2024, 10, 5);
        let habits = HabitCollection::from_habits(vec![
            once(today, true),
            // nothing scheduled on -1
            once(today.add_days(-2), true),
        ]);
        assert_eq!(current_streak(&habits, &today), 1);
    }

    #[test]
    fn test_incomplete_today_means_zero() {
        let today = day(2024, 10, 5);
        let habits = HabitCollection::from_habits(vec![
            once(today, false),
            once(today.add_days(-1), true),
        ]);
        assert_eq!(current_streak(&habits, &today), 0);
    }

    #[test]
    fn test_partial_day_breaks_streak() {
        let today = day(2024, 10, 5);
        let habits = HabitCollection::from_habits(vec![
            once(today, true),
            once(today.add_days(-1), true),
            once(today.add_days(-1), false),
        ]);
        assert_eq!(current_streak(&habits, &today), 1);
    }
}
