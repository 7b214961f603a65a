/// Public library interface for the habit and mood tracker
///
/// This module exports the tracker session object and the public types that
/// front ends (the bundled MCP server, tests, other applications) build on.

use std::path::PathBuf;
use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use analytics::{AnalyticsEngine, DayStatistics, MoodPoint, WeeklySummary};
pub use domain::*;
pub use storage::{HabitStorage, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One tracking session: the habit collection, the mood map and their storage
///
/// All operations go through `&mut self`, so requests run one at a time. Each
/// mutation is applied in memory first and then the affected collection is
/// written back as a whole. A failed write is returned to the caller; the
/// in-memory change stays in place and the next successful save persists it.
pub struct HabitTracker {
    storage: SqliteStorage,
    habits: HabitCollection,
    moods: MoodMap,
    analytics: AnalyticsEngine,
    clock: Clock,
}

impl HabitTracker {
    /// Open the tracker backed by the SQLite database at `db_path`
    ///
    /// This will initialize the database schema if it doesn't already exist
    /// and load any previously saved habits and moods.
    pub async fn new(db_path: PathBuf, clock: Clock) -> Result<Self, ServerError> {
        tracing::info!("Initializing habit tracker with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Self::with_storage(storage, clock)
    }

    /// Build a tracker over an already opened storage backend
    pub fn with_storage(storage: SqliteStorage, clock: Clock) -> Result<Self, ServerError> {
        let habits = storage.load_habits()?;
        let moods = storage.load_mood_map()?;

        tracing::info!(
            "Loaded {} habits and {} mood entries",
            habits.len(),
            moods.len()
        );

        Ok(Self {
            storage,
            habits,
            moods,
            analytics: AnalyticsEngine::new(),
            clock,
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server with {} habits", self.habits.len());

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// The reference day for every "today" decision in this session
    pub fn today(&self) -> DateKey {
        self.clock.today()
    }

    pub fn habits(&self) -> &HabitCollection {
        &self.habits
    }

    pub fn moods(&self) -> &MoodMap {
        &self.moods
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the analytics engine (useful for testing)
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    pub fn create_habit(&mut self, fields: HabitFields) -> Result<HabitId, ServerError> {
        let today = self.today();
        let habit_id = self.habits.create(fields, &today)?;
        self.save_habits()?;
        Ok(habit_id)
    }

    /// Replace a habit's metadata and recurrence, keeping its completions
    pub fn edit_habit(&mut self, habit_id: &HabitId, fields: HabitFields) -> Result<(), ServerError> {
        let today = self.today();
        self.habits.edit(habit_id, fields, &today)?;
        self.save_habits()
    }

    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Result<Habit, ServerError> {
        let habit = self.habits.delete(habit_id)?;
        self.save_habits()?;
        Ok(habit)
    }

    pub fn set_completion(
        &mut self,
        habit_id: &HabitId,
        day: DateKey,
        completed: bool,
    ) -> Result<(), ServerError> {
        self.habits.set_completion(habit_id, day, completed)?;
        self.save_habits()
    }

    /// Flip completion for `day` and return the new state
    pub fn toggle_completion(&mut self, habit_id: &HabitId, day: DateKey) -> Result<bool, ServerError> {
        let completed = self.habits.toggle_completion(habit_id, day)?;
        self.save_habits()?;
        Ok(completed)
    }

    /// Habits shown on `day`, in collection order
    pub fn habits_for_day(&self, day: &DateKey) -> Vec<&Habit> {
        self.habits.relevant(day, &self.today())
    }

    pub fn statistics_for(&self, day: &DateKey) -> DayStatistics {
        self.analytics
            .statistics_for(&self.habits, day, &self.today())
    }

    /// Weekly figures ending today
    pub fn summary(&self) -> WeeklySummary {
        self.analytics
            .summarize(&self.habits, &self.moods, &self.today())
    }

    /// Mood scores for the seven days ending today, oldest first
    pub fn recent_mood_series(&self) -> Vec<MoodPoint> {
        self.analytics
            .recent_mood_series(&self.moods, &self.today())
    }

    pub fn log_mood(&mut self, day: DateKey, mood: Mood, reason: &str) -> Result<MoodEntry, ServerError> {
        let today = self.today();
        let entry = self.moods.log(day, mood, reason, &today)?.clone();
        self.save_moods()?;
        Ok(entry)
    }

    /// Delete the mood for `day`; a day without an entry is left alone
    pub fn remove_mood(&mut self, day: &DateKey) -> Result<Option<MoodEntry>, ServerError> {
        let removed = self.moods.remove(day);
        if removed.is_some() {
            self.save_moods()?;
        }
        Ok(removed)
    }

    fn save_habits(&self) -> Result<(), ServerError> {
        self.storage.save_habits(&self.habits)?;
        Ok(())
    }

    fn save_moods(&self) -> Result<(), ServerError> {
        self.storage.save_mood_map(&self.moods)?;
        Ok(())
    }
}
