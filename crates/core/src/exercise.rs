// SPDX-License-Identifier: MIT

//!
//! The Monolift exercise catalog types
//!

use crate::{HasIdAndName, MonoliftId, Name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The body category an exercise primarily trains
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BodyCategory {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl BodyCategory {
    /// All categories, in the order they are presented to users
    pub fn all() -> &'static [BodyCategory] {
        &[
            BodyCategory::Chest,
            BodyCategory::Back,
            BodyCategory::Legs,
            BodyCategory::Shoulders,
            BodyCategory::Arms,
            BodyCategory::Core,
        ]
    }

    /// The lowercase string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyCategory::Chest => "chest",
            BodyCategory::Back => "back",
            BodyCategory::Legs => "legs",
            BodyCategory::Shoulders => "shoulders",
            BodyCategory::Arms => "arms",
            BodyCategory::Core => "core",
        }
    }

    /// Parse the lowercase string stored in the database
    pub fn parse(value: &str) -> Option<BodyCategory> {
        match value {
            "chest" => Some(BodyCategory::Chest),
            "back" => Some(BodyCategory::Back),
            "legs" => Some(BodyCategory::Legs),
            "shoulders" => Some(BodyCategory::Shoulders),
            "arms" => Some(BodyCategory::Arms),
            "core" => Some(BodyCategory::Core),
            _ => None,
        }
    }
}

impl fmt::Display for BodyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the exercise catalog.
///
/// An exercise may be a variant of another (e.g. "Paused Bench Press" is a
/// variant of "Bench Press"), in which case `variant_of` holds the parent's ID.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Exercise {
    /// The exercise's ID
    #[serde(default)]
    id: Option<MonoliftId>,

    /// The exercise's name
    name: Name,

    /// The body category the exercise primarily trains
    category: BodyCategory,

    /// The parent exercise this one is a variant of (if any)
    #[serde(default)]
    variant_of: Option<MonoliftId>,
}

impl Exercise {
    /// Create a Monolift [`Exercise`]
    pub fn from(
        id: Option<MonoliftId>,
        name: Name,
        category: BodyCategory,
        variant_of: Option<MonoliftId>,
    ) -> Self {
        Self {
            id,
            name,
            category,
            variant_of,
        }
    }

    /// Clear the exercise's ID
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Get the exercise's category
    pub fn category(&self) -> BodyCategory {
        self.category
    }

    /// Get the parent exercise's ID (if this exercise is a variant)
    pub fn variant_of(&self) -> Option<MonoliftId> {
        self.variant_of
    }

    /// Set the parent exercise this one is a variant of
    pub fn set_variant_of(&mut self, parent: Option<MonoliftId>) {
        self.variant_of = parent;
    }
}

impl HasIdAndName for Exercise {
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

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn category_round_trip() {
        for category in BodyCategory::all() {
            assert_eq!(BodyCategory::parse(category.as_str()), Some(*category));
        }
        assert_eq!(BodyCategory::parse("cardio"), None);
    }

    #[test]
    fn category_serde_is_lowercase() {
        let json = serde_json::to_string(&BodyCategory::Shoulders).unwrap();
        assert_eq!(json, r#""shoulders""#);
    }
}
