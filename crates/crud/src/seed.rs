// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Seed the exercise catalog
//!

use crate::crud::{Create, CrudError, exercise_id_from_name};
use log::info;
use monolift_core::{BodyCategory, Exercise, Name};
use sqlx::{Row, Sqlite, Transaction};

/// The built-in exercise catalog
pub const EXERCISE_CATALOG: &[(&str, BodyCategory)] = &[
    // Chest
    ("Bench Press", BodyCategory::Chest),
    ("Incline Bench Press", BodyCategory::Chest),
    ("Decline Bench Press", BodyCategory::Chest),
    ("Dumbbell Bench Press", BodyCategory::Chest),
    ("Incline Dumbbell Press", BodyCategory::Chest),
    ("Dumbbell Flyes", BodyCategory::Chest),
    ("Incline Dumbbell Flyes", BodyCategory::Chest),
    ("Cable Flyes", BodyCategory::Chest),
    ("Pec Deck", BodyCategory::Chest),
    ("Dips", BodyCategory::Chest),
    // Back
    ("Deadlift", BodyCategory::Back),
    ("Conventional Deadlift", BodyCategory::Back),
    ("Sumo Deadlift", BodyCategory::Back),
    ("Romanian Deadlift", BodyCategory::Back),
    ("Stiff Leg Deadlift", BodyCategory::Back),
    ("Pull-ups", BodyCategory::Back),
    ("Chin-ups", BodyCategory::Back),
    ("Lat Pulldown", BodyCategory::Back),
    ("Wide Grip Lat Pulldown", BodyCategory::Back),
    ("Cable Rows", BodyCategory::Back),
    ("Barbell Rows", BodyCategory::Back),
    ("Dumbbell Rows", BodyCategory::Back),
    ("T-Bar Rows", BodyCategory::Back),
    ("Chest Supported Rows", BodyCategory::Back),
    ("Hyperextensions", BodyCategory::Back),
    // Legs
    ("Squat", BodyCategory::Legs),
    ("Back Squat", BodyCategory::Legs),
    ("Front Squat", BodyCategory::Legs),
    ("Goblet Squat", BodyCategory::Legs),
    ("Bulgarian Split Squat", BodyCategory::Legs),
    ("Leg Press", BodyCategory::Legs),
    ("Lunges", BodyCategory::Legs),
    ("Walking Lunges", BodyCategory::Legs),
    ("Leg Curls", BodyCategory::Legs),
    ("Leg Extensions", BodyCategory::Legs),
    ("Calf Raises", BodyCategory::Legs),
    ("Standing Calf Raises", BodyCategory::Legs),
    ("Seated Calf Raises", BodyCategory::Legs),
    // Shoulders
    ("Overhead Press", BodyCategory::Shoulders),
    ("Military Press", BodyCategory::Shoulders),
    ("Push Press", BodyCategory::Shoulders),
    ("Dumbbell Shoulder Press", BodyCategory::Shoulders),
    ("Lateral Raises", BodyCategory::Shoulders),
    ("Front Raises", BodyCategory::Shoulders),
    ("Rear Delt Flyes", BodyCategory::Shoulders),
    ("Face Pulls", BodyCategory::Shoulders),
    ("Arnold Press", BodyCategory::Shoulders),
    ("Upright Rows", BodyCategory::Shoulders),
    // Arms
    ("Barbell Curls", BodyCategory::Arms),
    ("Dumbbell Curls", BodyCategory::Arms),
    ("Hammer Curls", BodyCategory::Arms),
    ("Preacher Curls", BodyCategory::Arms),
    ("Cable Curls", BodyCategory::Arms),
    ("Close Grip Bench Press", BodyCategory::Arms),
    ("Tricep Dips", BodyCategory::Arms),
    ("Tricep Pushdowns", BodyCategory::Arms),
    ("Overhead Tricep Extension", BodyCategory::Arms),
    ("French Press", BodyCategory::Arms),
    // Core
    ("Plank", BodyCategory::Core),
    ("Side Plank", BodyCategory::Core),
    ("Sit-ups", BodyCategory::Core),
    ("Crunches", BodyCategory::Core),
    ("Russian Twists", BodyCategory::Core),
    ("Leg Raises", BodyCategory::Core),
    ("Hanging Leg Raises", BodyCategory::Core),
    ("Mountain Climbers", BodyCategory::Core),
    ("Dead Bug", BodyCategory::Core),
    ("Bird Dog", BodyCategory::Core),
];

/// Variants of catalog exercises: (variant name, category, parent name)
pub const VARIANT_CATALOG: &[(&str, BodyCategory, &str)] = &[
    ("Paused Bench Press", BodyCategory::Chest, "Bench Press"),
    ("Spoto Press", BodyCategory::Chest, "Bench Press"),
    ("Paused Squat", BodyCategory::Legs, "Squat"),
    ("Box Squat", BodyCategory::Legs, "Squat"),
    ("Deficit Deadlift", BodyCategory::Back, "Deadlift"),
    ("Block Pull", BodyCategory::Back, "Deadlift"),
];

/// Whether an exercise with the given name already exists
async fn is_exercise_name_in_db(
    transaction: &mut Transaction<'_, Sqlite>,
    name: &str,
) -> Result<bool, CrudError> {
    let row = sqlx::query("SELECT COUNT(*) AS row_count FROM exercises WHERE name = ?")
        .bind(name)
        .fetch_one(&mut **transaction)
        .await?;
    let count: i64 = row.try_get("row_count")?;
    Ok(count > 0)
}

/// Seed the built-in exercise catalog and its variants.  Exercises that are
/// already present (by name) are skipped, so re-running is safe.  Returns how
/// many rows were inserted.
pub async fn seed_exercise_catalog(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<u32, CrudError> {
    let mut inserted = 0;

    for (name, category) in EXERCISE_CATALOG {
        if is_exercise_name_in_db(transaction, name).await? {
            continue;
        }
        let name = Name::from(name).map_err(|_| CrudError::Name)?;
        let mut exercise = Exercise::from(None, name, *category, None);
        exercise.create(transaction).await?;
        inserted += 1;
    }

    for (name, category, parent_name) in VARIANT_CATALOG {
        if is_exercise_name_in_db(transaction, name).await? {
            continue;
        }
        let parent_name = Name::from(parent_name).map_err(|_| CrudError::Name)?;
        let parent_id = exercise_id_from_name(transaction, &parent_name).await?;

        let name = Name::from(name).map_err(|_| CrudError::Name)?;
        let mut variant = Exercise::from(None, name, *category, Some(parent_id));
        variant.create(transaction).await?;
        inserted += 1;
    }

    info!("Seeded {inserted} catalog exercises");
    Ok(inserted)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crud::{FetchByName, Exercises, FetchAll};
    use monolift_core::HasIdAndName;
    use sqlx::{Pool, Sqlite};

    #[sqlx::test]
    async fn seed_is_idempotent(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let expected = (EXERCISE_CATALOG.len() + VARIANT_CATALOG.len()) as u32;
        let inserted = seed_exercise_catalog(&mut transaction).await.unwrap();
        assert_eq!(inserted, expected);

        // Second run inserts nothing
        let inserted = seed_exercise_catalog(&mut transaction).await.unwrap();
        assert_eq!(inserted, 0);

        let all = Exercises::fetch_all(&mut transaction).await.unwrap();
        assert_eq!(all.len(), expected as usize);
    }

    #[sqlx::test]
    async fn variants_link_to_their_parents(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();
        seed_exercise_catalog(&mut transaction).await.unwrap();

        let bench = Exercise::fetch_by_name(&mut transaction, &Name::from("Bench Press").unwrap())
            .await
            .unwrap();
        let spoto = Exercise::fetch_by_name(&mut transaction, &Name::from("Spoto Press").unwrap())
            .await
            .unwrap();
        assert_eq!(spoto.variant_of(), bench.id());
        assert_eq!(spoto.category(), BodyCategory::Chest);
    }
}
