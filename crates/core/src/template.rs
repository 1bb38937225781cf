// SPDX-License-Identifier: MIT

//!
//! The Monolift workout template types
//!

use crate::{HasIdAndName, MonoliftId, Name};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can arise in relation to a [`WorkoutTemplate`]
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    /// Days per week must be between 1 and 7
    #[error("Days per week `{0}` is not allowed (must be 1-7)")]
    InvalidDaysPerWeek(u8),

    /// A planned exercise must target at least one set
    #[error("Target sets must be at least 1")]
    TargetSetsZero,

    /// A planned exercise must target at least one rep
    #[error("Target reps must be at least 1")]
    TargetRepsZero,
}

/// One planned exercise within a [`WorkoutTemplate`]
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TemplateExercise {
    /// The planned exercise's ID
    id: Option<MonoliftId>,

    /// The catalog exercise being planned
    exercise_id: MonoliftId,

    /// Position of this exercise within the template
    display_order: u32,

    /// How many sets the template prescribes
    target_sets: u32,

    /// How many reps per set the template prescribes
    target_reps: u32,
}

impl TemplateExercise {
    /// Create a valid [`TemplateExercise`] if it is possible to do so with the
    /// values passed in
    pub fn from(
        id: Option<MonoliftId>,
        exercise_id: MonoliftId,
        display_order: u32,
        target_sets: u32,
        target_reps: u32,
    ) -> Result<Self, TemplateError> {
        if target_sets == 0 {
            return Err(TemplateError::TargetSetsZero);
        }
        if target_reps == 0 {
            return Err(TemplateError::TargetRepsZero);
        }
        Ok(Self {
            id,
            exercise_id,
            display_order,
            target_sets,
            target_reps,
        })
    }

    /// Get the planned exercise's ID
    pub fn id(&self) -> Option<MonoliftId> {
        self.id
    }

    /// Set the planned exercise's ID
    pub fn set_id(&mut self, id: MonoliftId) {
        self.id = Some(id)
    }

    /// Get the catalog exercise's ID
    pub fn exercise_id(&self) -> MonoliftId {
        self.exercise_id
    }

    /// Get the position of this exercise within the template
    pub fn display_order(&self) -> u32 {
        self.display_order
    }

    /// Get the number of sets the template prescribes
    pub fn target_sets(&self) -> u32 {
        self.target_sets
    }

    /// Get the number of reps per set the template prescribes
    pub fn target_reps(&self) -> u32 {
        self.target_reps
    }
}

/// The Monolift workout template type.  A template names a workout and lists
/// the exercises it prescribes, in display order.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkoutTemplate {
    /// The template's ID
    id: Option<MonoliftId>,

    /// The template's name
    name: Name,

    /// How many days per week the template is intended to be run
    days_per_week: u8,

    /// When the template was created
    created_at: DateTime<Utc>,

    /// When the template was last changed
    updated_at: DateTime<Utc>,

    /// The exercises the template prescribes, ordered by display order
    exercises: Vec<TemplateExercise>,
}

impl WorkoutTemplate {
    /// Create a valid Monolift [`WorkoutTemplate`] if it is possible to do so
    /// with the values passed in.  The exercise list is kept sorted by display
    /// order.
    pub fn from(
        id: Option<MonoliftId>,
        name: Name,
        days_per_week: u8,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        exercises: Vec<TemplateExercise>,
    ) -> Result<Self, TemplateError> {
        if !(1..=7).contains(&days_per_week) {
            return Err(TemplateError::InvalidDaysPerWeek(days_per_week));
        }
        let mut template = Self {
            id,
            name,
            days_per_week,
            created_at,
            updated_at,
            exercises,
        };
        template
            .exercises
            .sort_by_key(TemplateExercise::display_order);
        Ok(template)
    }

    /// Clear the template's ID
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Get how many days per week the template is intended to be run
    pub fn days_per_week(&self) -> u8 {
        self.days_per_week
    }

    /// Get when the template was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get when the template was last changed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Borrow the template's exercises (sorted by display order)
    pub fn exercises(&self) -> &[TemplateExercise] {
        &self.exercises
    }

    /// Add a planned exercise, keeping the list sorted by display order
    pub fn add_exercise(&mut self, exercise: TemplateExercise) {
        self.exercises.push(exercise);
        self.exercises
            .sort_by_key(TemplateExercise::display_order);
    }

    /// Record that the template was changed at the supplied time.  The time is
    /// injected rather than read from a clock so callers stay deterministic.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl<'de> Deserialize<'de> for TemplateExercise {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: Option<MonoliftId>,
            exercise_id: MonoliftId,
            display_order: u32,
            target_sets: u32,
            target_reps: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        TemplateExercise::from(
            raw.id,
            raw.exercise_id,
            raw.display_order,
            raw.target_sets,
            raw.target_reps,
        )
        .map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for WorkoutTemplate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: Option<MonoliftId>,
            name: Name,
            days_per_week: u8,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            #[serde(default)]
            exercises: Vec<TemplateExercise>,
        }

        let raw = Raw::deserialize(deserializer)?;
        WorkoutTemplate::from(
            raw.id,
            raw.name,
            raw.days_per_week,
            raw.created_at,
            raw.updated_at,
            raw.exercises,
        )
        .map_err(serde::de::Error::custom)
    }
}

impl HasIdAndName for WorkoutTemplate {
    fn id(&self) -> Option<MonoliftId> {
        self.id
    }

    fn set_id(&mut self, id: MonoliftId) {
        self.id = Some(id)
    }

    fn name(&self) -> &Name {
        &self.name
    }

    fn set_name(&mut self, name: Name) {
        self.name = name
    }
}
