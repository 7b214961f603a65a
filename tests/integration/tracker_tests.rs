/// Tracker sessions over an on-disk database
use habit_mood_tracker::*;
use tempfile::{tempdir, NamedTempFile};

fn day(y: i32, m: u32, d: u32) -> DateKey {
    DateKey::from_parts(y, m, d).unwrap()
}

#[cfg(test)]
mod tracker_tests {
    use super::*;

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("habits.db");
        let today = day(2024, 9, 2);

        let (walk, dentist) = {
            let mut tracker = HabitTracker::new(db_path.clone(), Clock::Fixed(today))
                .await
                .expect("Failed to open tracker");

            let walk = tracker
                .create_habit(HabitFields::new("Walk", "🚶", "30 min", Recurrence::Everyday))
                .unwrap();
            let dentist = tracker
                .create_habit(HabitFields::new(
                    "Dentist",
                    "🦷",
                    "",
                    Recurrence::OnDate(today.add_days(3)),
                ))
                .unwrap();
            tracker.set_completion(&walk, today, true).unwrap();
            tracker.log_mood(today, Mood::Great, "sunny").unwrap();

            let walk = tracker.habits().get(&walk).unwrap().clone();
            let dentist = tracker.habits().get(&dentist).unwrap().clone();
            (walk, dentist)
        };

        // A later session sees the same data; ids are reassigned on load
        let tracker = HabitTracker::new(db_path, Clock::Fixed(today.add_days(1)))
            .await
            .expect("Failed to reopen tracker");

        assert_eq!(tracker.habits().habits(), &[walk, dentist][..]);
        assert_eq!(tracker.moods().get(&today).unwrap().reason, "sunny");

        // Yesterday's everyday completion no longer counts
        let yesterday = tracker.statistics_for(&today);
        assert_eq!(yesterday.total, 0);
        assert_eq!(tracker.statistics_for(&tracker.today()).total, 1);
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let today = day(2024, 9, 2);

        {
            let mut tracker = HabitTracker::new(db_path.clone(), Clock::Fixed(today)).await.unwrap();
            let id = tracker
                .create_habit(HabitFields::new("Temp", "🗑️", "", Recurrence::Everyday))
                .unwrap();
            tracker
                .create_habit(HabitFields::new("Keep", "📌", "", Recurrence::Everyday))
                .unwrap();
            let removed = tracker.delete_habit(&id).unwrap();
            assert_eq!(removed.name, "Temp");
        }

        let tracker = HabitTracker::new(db_path, Clock::Fixed(today)).await.unwrap();
        let names: Vec<&str> = tracker.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Keep"]);
    }

    #[test]
    fn test_corrupt_records_do_not_block_loading() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage
            .put_value(
                storage::HABITS_KEY,
                "Walk|🚶||true|null|2024-09-01;;;broken;;;Trip|✈️||false|2024-8-20|",
            )
            .unwrap();
        storage.put_value(storage::MOOD_ENTRIES_KEY, "{oops").unwrap();

        let tracker = HabitTracker::with_storage(storage, Clock::Fixed(day(2024, 9, 2))).unwrap();
        let names: Vec<&str> = tracker.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Walk", "Trip"]);
        assert!(tracker.moods().is_empty());

        let trip = tracker.habits_for_day(&day(2024, 9, 20));
        assert_eq!(trip.len(), 2);
    }

    #[test]
    fn test_storage_is_usable_as_trait_object() {
        let storage = SqliteStorage::in_memory().unwrap();
        let storage: &dyn HabitStorage = &storage;
        storage.save_habits(&HabitCollection::new()).unwrap();
        assert_eq!(storage.get_value(storage::HABITS_KEY).unwrap(), Some(String::new()));
    }
}
