/// Storage layer for persisting habit data
///
/// The application treats durable storage as a key-value string store. This
/// module defines that interface and builds habit and mood persistence on top
/// of it with the flat-string codec.

pub mod codec;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use codec::DecodeError;
pub use sqlite::*;

use thiserror::Error;

use crate::domain::{HabitCollection, MoodMap};

/// Key holding the encoded habit list
pub const HABITS_KEY: &str = "habits_list";
/// Key holding the encoded mood map
pub const MOOD_ENTRIES_KEY: &str = "mood_entries";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits and moods
///
/// Implementors only provide string get/put/remove; encoding and decoding stay
/// in this crate. Saves replace the whole value, so the last write wins.
pub trait HabitStorage {
    /// Read a stored value
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value, replacing any previous one
    fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value; missing keys are not an error
    fn remove_value(&self, key: &str) -> Result<(), StorageError>;

    /// Load the habit list, skipping records that fail to decode
    fn load_habits(&self) -> Result<HabitCollection, StorageError> {
        let encoded = self.get_value(HABITS_KEY)?.unwrap_or_default();
        let habits = codec::decode_habits(&encoded);
        tracing::debug!("Loaded {} habits", habits.len());
        Ok(habits)
    }

    /// Persist the whole habit list
    fn save_habits(&self, habits: &HabitCollection) -> Result<(), StorageError> {
        self.put_value(HABITS_KEY, &codec::encode_habits(habits))?;
        tracing::debug!("Saved {} habits", habits.len());
        Ok(())
    }

    /// Remove every stored habit
    fn clear_habits(&self) -> Result<(), StorageError> {
        self.remove_value(HABITS_KEY)
    }

    /// Load the mood map, skipping entries that fail to decode
    fn load_mood_map(&self) -> Result<MoodMap, StorageError> {
        let encoded = self.get_value(MOOD_ENTRIES_KEY)?.unwrap_or_default();
        let moods = codec::decode_mood_map(&encoded);
        tracing::debug!("Loaded {} mood entries", moods.len());
        Ok(moods)
    }

    /// Persist the whole mood map
    fn save_mood_map(&self, moods: &MoodMap) -> Result<(), StorageError> {
        self.put_value(MOOD_ENTRIES_KEY, &codec::encode_mood_map(moods)?)?;
        tracing::debug!("Saved {} mood entries", moods.len());
        Ok(())
    }
}
