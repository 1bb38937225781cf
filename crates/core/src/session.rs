// SPDX-License-Identifier: MIT

//!
//! The Monolift workout session type
//!

use crate::MonoliftId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can arise in relation to a [`WorkoutSession`]
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    /// The session cannot finish before it started
    #[error("The session's finish time precedes its start time")]
    FinishBeforeStart,
}

/// One logged workout.  A session optionally references the template it was
/// started from; the reference survives the template being deleted by being
/// cleared, not by deleting the session.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkoutSession {
    /// The session's ID
    id: Option<MonoliftId>,

    /// The template the session was started from (if any)
    template_id: Option<MonoliftId>,

    /// When the session started
    started_at: DateTime<Utc>,

    /// When the session finished (if it has)
    finished_at: Option<DateTime<Utc>>,

    /// When the session row was created
    created_at: DateTime<Utc>,

    /// When the session row was last changed
    updated_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// Create a valid Monolift [`WorkoutSession`] if it is possible to do so
    /// with the values passed in
    pub fn from(
        id: Option<MonoliftId>,
        template_id: Option<MonoliftId>,
        started_at: DateTime<Utc>,
        finished_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if let Some(finished_at) = finished_at {
            if finished_at < started_at {
                return Err(SessionError::FinishBeforeStart);
            }
        }
        Ok(Self {
            id,
            template_id,
            started_at,
            finished_at,
            created_at,
            updated_at,
        })
    }

    /// Get the session's ID
    pub fn id(&self) -> Option<MonoliftId> {
        self.id
    }

    /// Set the session's ID
    pub fn set_id(&mut self, id: MonoliftId) {
        self.id = Some(id)
    }

    /// Clear the session's ID
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Get the ID of the template the session was started from (if any)
    pub fn template_id(&self) -> Option<MonoliftId> {
        self.template_id
    }

    /// Clear the session's template reference
    pub fn clear_template_id(&mut self) {
        self.template_id = None;
    }

    /// Get when the session started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Get when the session finished (if it has)
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// The calendar date the session started on.  This is what the calendar
    /// marks as a workout day.
    pub fn started_on(&self) -> NaiveDate {
        self.started_at.date_naive()
    }

    /// Get when the session row was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get when the session row was last changed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mark the session finished at the supplied time if that time is valid
    pub fn finish(&mut self, finished_at: DateTime<Utc>) -> Result<(), SessionError> {
        if finished_at < self.started_at {
            return Err(SessionError::FinishBeforeStart);
        }
        self.finished_at = Some(finished_at);
        self.updated_at = finished_at;
        Ok(())
    }
}

impl<'de> Deserialize<'de> for WorkoutSession {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: Option<MonoliftId>,
            #[serde(default)]
            template_id: Option<MonoliftId>,
            started_at: DateTime<Utc>,
            #[serde(default)]
            finished_at: Option<DateTime<Utc>>,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
        }

        let raw = Raw::deserialize(deserializer)?;
        WorkoutSession::from(
            raw.id,
            raw.template_id,
            raw.started_at,
            raw.finished_at,
            raw.created_at,
            raw.updated_at,
        )
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn at(time: &str) -> DateTime<Utc> {
        time.parse().unwrap()
    }

    #[test]
    fn finish_before_start_rejected() {
        let started = at("2024-06-15T18:00:00Z");
        let result = WorkoutSession::from(
            None,
            None,
            started,
            Some(at("2024-06-15T17:00:00Z")),
            started,
            started,
        );
        assert!(result.is_err());

        let mut session =
            WorkoutSession::from(None, None, started, None, started, started).unwrap();
        assert!(session.finish(at("2024-06-15T17:59:00Z")).is_err());
        assert!(session.finish(at("2024-06-15T19:05:00Z")).is_ok());
        assert_eq!(session.finished_at(), Some(at("2024-06-15T19:05:00Z")));
    }

    #[test]
    fn started_on_is_the_calendar_date() {
        let started = at("2024-06-15T23:30:00Z");
        let session = WorkoutSession::from(None, None, started, None, started, started).unwrap();
        assert_eq!(
            session.started_on(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }
}
