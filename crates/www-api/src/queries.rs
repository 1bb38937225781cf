// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All query parameter structs
//!

use chrono::NaiveDate;
use serde::Deserialize;

/// Query parameters used when fetching a series with an optional cutoff date
#[derive(Deserialize, Default)]
pub struct SinceQueryParams {
    /// Leave out data from before this date
    pub since: Option<NaiveDate>,
}
