// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The workout-data provider the calendar runs off: which dates have a
//! logged session
//!

use crate::crud::common::CrudError;
use chrono::{DateTime, Utc};
use sqlx::{Row, Sqlite, Transaction};
use std::collections::BTreeSet;

/// Fetch the set of calendar dates with at least one logged session.  The
/// calendar grid's `has_workout` flags are filled from this.
pub async fn fetch_workout_dates(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<BTreeSet<chrono::NaiveDate>, CrudError> {
    let rows = sqlx::query("SELECT started_at FROM sessions")
        .fetch_all(&mut **transaction)
        .await?;

    rows.iter()
        .map(|row| {
            let started_at: DateTime<Utc> = row.try_get("started_at")?;
            Ok(started_at.date_naive())
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{catalog_exercise, logged_session};
    use chrono::NaiveDate;
    use monolift_core::BodyCategory;
    use sqlx::{Pool, Sqlite};

    #[sqlx::test]
    async fn one_date_per_day_with_sessions(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let bench = catalog_exercise(&mut transaction, "Bench Press", BodyCategory::Chest).await;
        logged_session(&mut transaction, bench, "2024-06-10T18:00:00Z", &[(5, 180.0)]).await;
        // Two sessions on the same day collapse to one date
        logged_session(&mut transaction, bench, "2024-06-12T07:00:00Z", &[(5, 185.0)]).await;
        logged_session(&mut transaction, bench, "2024-06-12T18:00:00Z", &[(3, 195.0)]).await;

        let dates = fetch_workout_dates(&mut transaction).await.unwrap();
        let expected: BTreeSet<NaiveDate> = ["2024-06-10", "2024-06-12"]
            .iter()
            .map(|day| day.parse().unwrap())
            .collect();
        assert_eq!(dates, expected);
    }
}
