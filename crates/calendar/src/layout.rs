// SPDX-License-Identifier: MIT

//!
//! Grid layout parameters
//!

use serde::Serialize;

/// The fixed pixel geometry the grid renders with.  Pixel-to-row arithmetic
/// in the viewport tracker and the centering helper runs off these values.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Height of one week row
    pub row_height_px: f64,

    /// Height of the fixed header above the scrolling grid (title, year,
    /// weekday strip and separator)
    pub header_height_px: f64,

    /// Height of the whole viewport, header included
    pub viewport_height_px: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout {
            row_height_px: 63.0,
            header_height_px: 160.0,
            viewport_height_px: 800.0,
        }
    }
}

impl GridLayout {
    /// How many rows fit in the visible area below the header
    pub fn visible_row_count(&self) -> f64 {
        (self.viewport_height_px - self.header_height_px) / self.row_height_px
    }
}
