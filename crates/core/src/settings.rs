// SPDX-License-Identifier: MIT

//!
//! User settings
//!

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.204_622_62;

/// The unit loads are displayed and entered in
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Lbs,
    Kg,
}

impl WeightUnit {
    /// Convert a load in this unit to the other unit
    pub fn convert_to(&self, other: WeightUnit, load: f64) -> f64 {
        match (self, other) {
            (WeightUnit::Lbs, WeightUnit::Kg) => load / LBS_PER_KG,
            (WeightUnit::Kg, WeightUnit::Lbs) => load * LBS_PER_KG,
            _ => load,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Kg => write!(f, "kg"),
        }
    }
}

/// Everything the settings screens can change
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// The unit loads are displayed and entered in
    pub weight_unit: WeightUnit,

    /// Default rest timer length between sets
    pub rest_timer_secs: u32,

    /// Whether set logging gives haptic feedback
    pub haptic_feedback: bool,

    /// Whether workout reminders are enabled
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            weight_unit: WeightUnit::Lbs,
            rest_timer_secs: 90,
            haptic_feedback: true,
            notifications_enabled: false,
        }
    }
}
