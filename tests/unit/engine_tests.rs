/// Relevance, completion and statistics properties over whole collections
use habit_mood_tracker::analytics::{current_streak, day_statistics, weekly_average};
use habit_mood_tracker::*;

fn day(y: i32, m: u32, d: u32) -> DateKey {
    DateKey::from_parts(y, m, d).unwrap()
}

fn fields(name: &str, recurrence: Recurrence) -> HabitFields {
    HabitFields::new(name, "✅", "", recurrence)
}

/// Single-day habit scheduled on `on`, created while `on` was still today
fn add_on_date(habits: &mut HabitCollection, name: &str, on: DateKey) -> HabitId {
    habits.create(fields(name, Recurrence::OnDate(on)), &on).unwrap()
}

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn test_everyday_habit_visible_from_creation_day_on() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();
        habits.create(fields("Stretch", Recurrence::Everyday), &t).unwrap();

        assert!(habits.relevant(&t.add_days(-1), &t).is_empty());
        assert_eq!(habits.relevant(&t, &t).len(), 1);
        assert_eq!(habits.relevant(&t.add_days(1), &t).len(), 1);
        assert_eq!(habits.relevant(&t.add_days(365), &t).len(), 1);
    }

    #[test]
    fn test_on_date_habit_visible_only_on_its_day() {
        let t = day(2024, 3, 15);
        let target = t.add_days(4);
        let mut habits = HabitCollection::new();
        habits.create(fields("Call", Recurrence::OnDate(target)), &t).unwrap();

        for offset in -10..10 {
            let d = t.add_days(offset);
            let visible = !habits.relevant(&d, &t).is_empty();
            assert_eq!(visible, d.is_same_day(&target), "day {}", d);
        }
    }

    #[test]
    fn test_percentage_always_in_range() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();
        let a = habits.create(fields("A", Recurrence::Everyday), &t).unwrap();
        habits.create(fields("B", Recurrence::Everyday), &t).unwrap();
        let c = add_on_date(&mut habits, "C", t.add_days(2));

        habits.set_completion(&a, t, true).unwrap();
        habits.set_completion(&c, t.add_days(2), true).unwrap();
        habits.set_completion(&c, t.add_days(-2), true).unwrap();

        for offset in -7..7 {
            let pct = day_statistics(&habits, &t.add_days(offset), &t).percentage;
            assert!((0.0..=100.0).contains(&pct), "pct {} out of range", pct);
        }
    }

    #[test]
    fn test_completion_idempotence_and_double_toggle() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();
        let id = habits.create(fields("Read", Recurrence::Everyday), &t).unwrap();

        habits.set_completion(&id, t, true).unwrap();
        let once = habits.get(&id).unwrap().completed_days.clone();
        habits.set_completion(&id, t, true).unwrap();
        assert_eq!(habits.get(&id).unwrap().completed_days, once);

        habits.set_completion(&id, t.add_days(1), false).unwrap();
        assert_eq!(habits.get(&id).unwrap().completed_days, once);

        habits.toggle_completion(&id, t.add_days(3)).unwrap();
        habits.toggle_completion(&id, t.add_days(3)).unwrap();
        assert_eq!(habits.get(&id).unwrap().completed_days, once);
    }

    #[test]
    fn test_streak_counts_fully_completed_days_back_from_today() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();

        // Past days only show single-day habits, so each day gets its own
        for offset in 0..4 {
            let d = t.add_days(-offset);
            let id = add_on_date(&mut habits, &format!("Day {}", offset), d);
            if offset < 3 {
                habits.set_completion(&id, d, true).unwrap();
            }
        }

        assert_eq!(current_streak(&habits, &t), 3);
    }

    #[test]
    fn test_everyday_history_alone_streaks_one_day() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();
        let id = habits.create(fields("Walk", Recurrence::Everyday), &t).unwrap();
        for offset in 0..3 {
            habits.set_completion(&id, t.add_days(-offset), true).unwrap();
        }

        // Yesterday has no visible habits, which ends the walk
        assert_eq!(current_streak(&habits, &t), 1);
    }

    #[test]
    fn test_weekly_average_skips_days_without_habits() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();
        for offset in 0..3 {
            let d = t.add_days(-offset);
            let id = add_on_date(&mut habits, &format!("Day {}", offset), d);
            habits.set_completion(&id, d, true).unwrap();
        }

        assert_eq!(weekly_average(&habits, &t), 100.0);
    }

    #[test]
    fn test_weekly_average_also_skips_fully_missed_days() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();
        let done = add_on_date(&mut habits, "Done", t.add_days(-1));
        habits.set_completion(&done, t.add_days(-1), true).unwrap();
        add_on_date(&mut habits, "Missed", t.add_days(-2));

        assert_eq!(weekly_average(&habits, &t), 100.0);
    }

    #[test]
    fn test_edit_moves_visibility_but_keeps_history() {
        let t = day(2024, 3, 15);
        let mut habits = HabitCollection::new();
        let id = habits.create(fields("Swim", Recurrence::Everyday), &t).unwrap();
        habits.set_completion(&id, t, true).unwrap();

        habits
            .edit(&id, fields("Swim", Recurrence::OnDate(t.add_days(1))), &t)
            .unwrap();

        assert!(habits.relevant(&t, &t).is_empty());
        assert!(habits.get(&id).unwrap().is_completed_on(&t));
        assert_eq!(day_statistics(&habits, &t, &t).total, 0);
    }

    #[test]
    fn test_most_common_mood_over_week() {
        // 2024-03-13 is a Wednesday
        let wed = day(2024, 3, 13);
        let mut moods = MoodMap::new();
        moods.log(wed.add_days(-2), Mood::Good, "", &wed).unwrap();
        moods.log(wed.add_days(-1), Mood::Good, "", &wed).unwrap();
        moods.log(wed, Mood::Bad, "", &wed).unwrap();

        let summary = AnalyticsEngine::new().summarize(&HabitCollection::new(), &moods, &wed);
        assert_eq!(summary.most_common_label(), "Good");

        let scores: Vec<u8> = summary.mood_trend.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![4, 4, 4, 4, 5, 5, 2]);
    }

    #[test]
    fn test_mood_outside_week_is_ignored() {
        let t = day(2024, 3, 15);
        let mut moods = MoodMap::new();
        moods.log(t.add_days(-7), Mood::Awful, "", &t).unwrap();

        let summary = AnalyticsEngine::new().summarize(&HabitCollection::new(), &moods, &t);
        assert_eq!(summary.most_common_label(), "No data");
        assert!(summary.mood_trend.iter().all(|p| p.mood.is_none()));
    }
}
