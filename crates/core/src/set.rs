// SPDX-License-Identifier: MIT

//!
//! The Monolift set types (logged sets and rest logs)
//!

use crate::MonoliftId;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can arise in relation to an [`ExerciseSet`]
#[derive(Error, Debug, Clone)]
pub enum SetError {
    /// A logged set must have at least one rep
    #[error("Reps must be at least 1")]
    RepsZero,

    /// The load must be a finite, non-negative number
    #[error("Load `{0}` is not allowed")]
    InvalidLoad(f64),
}

/// One logged set of an exercise within a session
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ExerciseSet {
    /// The set's ID
    id: Option<MonoliftId>,

    /// The session the set was logged in
    session_id: MonoliftId,

    /// The catalog exercise the set was performed for
    exercise_id: MonoliftId,

    /// Position of this set within the session (0-based)
    set_index: u32,

    /// How many reps were completed
    reps: u32,

    /// The load used, in the user's weight unit
    load: f64,

    /// Whether the final rep was a partial
    is_partial: bool,

    /// If this set was a dropset, the index of the set it dropped from
    dropset_of_index: Option<u32>,
}

impl ExerciseSet {
    /// Create a valid Monolift [`ExerciseSet`] if it is possible to do so with
    /// the values passed in
    #[allow(clippy::too_many_arguments)]
    pub fn from(
        id: Option<MonoliftId>,
        session_id: MonoliftId,
        exercise_id: MonoliftId,
        set_index: u32,
        reps: u32,
        load: f64,
        is_partial: bool,
        dropset_of_index: Option<u32>,
    ) -> Result<Self, SetError> {
        if reps == 0 {
            return Err(SetError::RepsZero);
        }
        if !load.is_finite() || load < 0.0 {
            return Err(SetError::InvalidLoad(load));
        }
        Ok(Self {
            id,
            session_id,
            exercise_id,
            set_index,
            reps,
            load,
            is_partial,
            dropset_of_index,
        })
    }

    /// Get the set's ID
    pub fn id(&self) -> Option<MonoliftId> {
        self.id
    }

    /// Set the set's ID
    pub fn set_id(&mut self, id: MonoliftId) {
        self.id = Some(id)
    }

    /// Clear the set's ID
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Get the ID of the session the set was logged in
    pub fn session_id(&self) -> MonoliftId {
        self.session_id
    }

    /// Get the ID of the exercise the set was performed for
    pub fn exercise_id(&self) -> MonoliftId {
        self.exercise_id
    }

    /// Get the position of this set within the session
    pub fn set_index(&self) -> u32 {
        self.set_index
    }

    /// Get how many reps were completed
    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// Get the load used
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Whether the final rep was a partial
    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    /// If this set was a dropset, the index of the set it dropped from
    pub fn dropset_of_index(&self) -> Option<u32> {
        self.dropset_of_index
    }
}

impl<'de> Deserialize<'de> for ExerciseSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: Option<MonoliftId>,
            session_id: MonoliftId,
            exercise_id: MonoliftId,
            set_index: u32,
            reps: u32,
            load: f64,
            #[serde(default)]
            is_partial: bool,
            #[serde(default)]
            dropset_of_index: Option<u32>,
        }

        let raw = Raw::deserialize(deserializer)?;
        ExerciseSet::from(
            raw.id,
            raw.session_id,
            raw.exercise_id,
            raw.set_index,
            raw.reps,
            raw.load,
            raw.is_partial,
            raw.dropset_of_index,
        )
        .map_err(serde::de::Error::custom)
    }
}

/// One logged rest period between sets
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RestLog {
    /// The rest log's ID
    #[serde(default)]
    id: Option<MonoliftId>,

    /// The session the rest was taken in
    session_id: MonoliftId,

    /// The set the rest followed
    set_index: u32,

    /// How long the rest lasted
    seconds: u32,
}

impl RestLog {
    /// Create a Monolift [`RestLog`]
    pub fn from(
        id: Option<MonoliftId>,
        session_id: MonoliftId,
        set_index: u32,
        seconds: u32,
    ) -> Self {
        Self {
            id,
            session_id,
            set_index,
            seconds,
        }
    }

    /// Get the rest log's ID
    pub fn id(&self) -> Option<MonoliftId> {
        self.id
    }

    /// Set the rest log's ID
    pub fn set_id(&mut self, id: MonoliftId) {
        self.id = Some(id)
    }

    /// Get the ID of the session the rest was taken in
    pub fn session_id(&self) -> MonoliftId {
        self.session_id
    }

    /// Get the index of the set the rest followed
    pub fn set_index(&self) -> u32 {
        self.set_index
    }

    /// Get how long the rest lasted
    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_sets_rejected() {
        let session = MonoliftId::new();
        let exercise = MonoliftId::new();
        assert!(ExerciseSet::from(None, session, exercise, 0, 0, 100.0, false, None).is_err());
        assert!(
            ExerciseSet::from(None, session, exercise, 0, 5, f64::NAN, false, None).is_err()
        );
        assert!(ExerciseSet::from(None, session, exercise, 0, 5, -20.0, false, None).is_err());
        assert!(ExerciseSet::from(None, session, exercise, 0, 5, 100.0, false, None).is_ok());
    }
}
