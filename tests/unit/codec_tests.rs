/// Flat-string persistence format
use habit_mood_tracker::storage::codec::{decode_habits, decode_mood_map, encode_habits, encode_mood_map};
use habit_mood_tracker::*;

fn day(y: i32, m: u32, d: u32) -> DateKey {
    DateKey::from_parts(y, m, d).unwrap()
}

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn test_decode_stored_everyday_habit() {
        let habits = decode_habits("Drink|💧|Stay hydrated|true|null|2024-01-01,2024-01-02");

        assert_eq!(habits.len(), 1);
        let drink = &habits.habits()[0];
        assert_eq!(drink.name, "Drink");
        assert_eq!(drink.emoji, "💧");
        assert_eq!(drink.description, "Stay hydrated");
        assert_eq!(drink.recurrence, Recurrence::Everyday);
        assert!(drink.is_completed_on(&day(2024, 1, 1)));
        assert!(drink.is_completed_on(&day(2024, 1, 2)));
        assert_eq!(drink.completion_count(), 2);
    }

    #[test]
    fn test_collection_round_trip() {
        let today = day(2024, 1, 20);
        let mut habits = HabitCollection::new();
        let a = habits
            .create(HabitFields::new("Drink", "💧", "8 glasses", Recurrence::Everyday), &today)
            .unwrap();
        let b = habits
            .create(
                HabitFields::new("Dentist", "🦷", "", Recurrence::OnDate(day(2024, 12, 31))),
                &today,
            )
            .unwrap();
        habits.create(HabitFields::new("Idle", "💤", "", Recurrence::Everyday), &today).unwrap();
        habits.set_completion(&a, day(2024, 1, 20), true).unwrap();
        habits.set_completion(&a, day(2023, 11, 5), true).unwrap();
        habits.set_completion(&b, day(2024, 12, 31), true).unwrap();

        let encoded = encode_habits(&habits);
        assert!(encoded.contains("2024-11-31"), "custom date month is zero-based: {}", encoded);
        assert!(encoded.contains("2024-12-31"), "completed day month is one-based: {}", encoded);
        assert_eq!(decode_habits(&encoded), habits);
    }

    #[test]
    fn test_bad_records_are_dropped_individually() {
        let stored = [
            "Good|👍||true|null|",
            "too|few",
            "Bad date|📅||false|2024-13-1|",
            "No date|❓||false|null|",
            "Bad day|📆||true|null|2024-01-xx",
            "Later|⏭️||false|2030-0-15|2030-01-15",
        ]
        .join(";;;");

        let habits = decode_habits(&stored);
        let names: Vec<&str> = habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Later"]);
        assert_eq!(habits.habits()[1].recurrence, Recurrence::OnDate(day(2030, 1, 15)));
    }

    #[test]
    fn test_empty_input_is_empty_collection() {
        assert!(decode_habits("").is_empty());
        assert!(decode_mood_map("").is_empty());
        assert!(decode_mood_map("not json").is_empty());
    }

    #[test]
    fn test_mood_map_round_trip_and_keys() {
        let today = day(2024, 1, 5);
        let mut moods = MoodMap::new();
        moods.log(today, Mood::Excellent, "promotion", &today).unwrap();
        moods.log(day(2023, 12, 31), Mood::Poor, "", &today).unwrap();

        let encoded = encode_mood_map(&moods).unwrap();
        let json: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(json["2024-0-5"]["mood"], "Excellent");
        assert_eq!(json["2024-0-5"]["emoji"], "😄");
        assert_eq!(json["2024-0-5"]["reason"], "promotion");
        assert_eq!(json["2023-11-31"]["mood"], "Poor");

        assert_eq!(decode_mood_map(&encoded), moods);
    }

    #[test]
    fn test_unknown_mood_drops_only_that_entry() {
        let encoded = r#"{"2024-0-5":{"mood":"Great","emoji":"😊","reason":"x"},"2024-0-6":{"mood":"Meh","emoji":"?","reason":""}}"#;
        let moods = decode_mood_map(encoded);
        assert_eq!(moods.len(), 1);
        assert_eq!(moods.get(&day(2024, 1, 5)).unwrap().mood, Mood::Great);
    }
}
