// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Read & write the user's settings file
//!

use crate::CrudError;
use log::warn;
use monolift_core::Settings;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Load settings from the given JSON file.  A missing file loads as the
/// defaults, the same as a fresh install.
pub fn load_settings(path: &Path) -> Result<Settings, CrudError> {
    if !path.exists() {
        warn!(
            "No settings found at {}, using defaults",
            path.to_string_lossy()
        );
        return Ok(Settings::default());
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write settings to the given JSON file, creating parent directories as
/// needed
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), CrudError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use monolift_core::{MonoliftId, WeightUnit};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn missing_file_loads_defaults() {
        let path = PathBuf::from(format!("/tmp/{}/settings.json", MonoliftId::new()));
        assert_eq!(load_settings(&path).unwrap(), Settings::default());
    }

    #[test]
    fn settings_round_trip_through_the_file() {
        let path = PathBuf::from(format!("/tmp/{}/settings.json", MonoliftId::new()));
        let settings = Settings {
            weight_unit: WeightUnit::Kg,
            rest_timer_secs: 180,
            haptic_feedback: false,
            notifications_enabled: true,
        };
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
