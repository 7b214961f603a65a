/// The owned, ordered habit list and the per-day query layer

use serde::Serialize;

use crate::domain::{is_visible_on, DateKey, DomainError, Habit, HabitFields, HabitId};

/// Ordered sequence of habits owned by one session
///
/// The relevant set for a day is recomputed on every query; nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HabitCollection {
    habits: Vec<Habit>,
}

impl HabitCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_habits(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.habits.iter()
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == *habit_id)
    }

    fn get_mut(&mut self, habit_id: &HabitId) -> Result<&mut Habit, DomainError> {
        self.habits
            .iter_mut()
            .find(|h| h.id == *habit_id)
            .ok_or(DomainError::HabitNotFound { habit_id: *habit_id })
    }

    /// Validate and append a new habit
    pub fn create(&mut self, fields: HabitFields, today: &DateKey) -> Result<HabitId, DomainError> {
        let habit = Habit::new(fields, today)?;
        let habit_id = habit.id;
        tracing::debug!("Created habit: {} ({})", habit.name, habit_id);
        self.habits.push(habit);
        Ok(habit_id)
    }

    pub fn edit(
        &mut self,
        habit_id: &HabitId,
        fields: HabitFields,
        today: &DateKey,
    ) -> Result<(), DomainError> {
        let habit = self.get_mut(habit_id)?;
        habit.update(fields, today)?;
        tracing::debug!("Updated habit: {} ({})", habit.name, habit_id);
        Ok(())
    }

    /// Remove a habit permanently, returning it
    pub fn delete(&mut self, habit_id: &HabitId) -> Result<Habit, DomainError> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == *habit_id)
            .ok_or(DomainError::HabitNotFound { habit_id: *habit_id })?;
        let habit = self.habits.remove(index);
        tracing::debug!("Deleted habit: {} ({})", habit.name, habit_id);
        Ok(habit)
    }

    pub fn set_completion(
        &mut self,
        habit_id: &HabitId,
        day: DateKey,
        completed: bool,
    ) -> Result<(), DomainError> {
        self.get_mut(habit_id)?.set_completion(day, completed);
        Ok(())
    }

    pub fn toggle_completion(&mut self, habit_id: &HabitId, day: DateKey) -> Result<bool, DomainError> {
        Ok(self.get_mut(habit_id)?.toggle_completion(day))
    }

    /// Habits visible on `day`, in collection order
    pub fn relevant(&self, day: &DateKey, today: &DateKey) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|h| is_visible_on(h, day, today))
            .collect()
    }

    /// Relevant habits completed on `day`
    pub fn completed_count(&self, day: &DateKey, today: &DateKey) -> usize {
        self.relevant(day, today)
            .into_iter()
            .filter(|h| h.is_completed_on(day))
            .count()
    }

    pub fn total_count(&self, day: &DateKey, today: &DateKey) -> usize {
        self.relevant(day, today).len()
    }
}

impl<'a> IntoIterator for &'a HabitCollection {
    type Item = &'a Habit;
    type IntoIter = std::slice::Iter<'a, Habit>;

    fn into_iter(self) -> Self::IntoIter {
        self.habits.iter()
    }
}
