// SPDX-License-Identifier: MIT

//!
//! Viewport tracking: map scroll offsets to the centred year and the
//! visibility of the "jump to today" control
//!

use crate::{CalendarModel, GridLayout};
use chrono::{Datelike, NaiveDate};
use log::trace;
use serde::Serialize;
use thiserror::Error;

/// Errors that can arise when validating scroll input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollError {
    /// The scroll offset must be a finite number
    #[error("Scroll offset `{0}` is not allowed")]
    NonFiniteOffset(f64),

    /// The viewport height must be finite and positive
    #[error("Viewport height `{0}` is not allowed")]
    InvalidViewportHeight(f64),

    /// The row height must be finite and positive
    #[error("Row height `{0}` is not allowed")]
    InvalidRowHeight(f64),
}

/// One validated scroll tick: the vertical offset and the geometry needed to
/// turn pixels into row indices.  Negative offsets (overscroll bounce) clamp
/// to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollInput {
    offset_y: f64,
    viewport_height_px: f64,
    row_height_px: f64,
}

impl ScrollInput {
    /// Validate and create a [`ScrollInput`]
    pub fn new(
        offset_y: f64,
        viewport_height_px: f64,
        row_height_px: f64,
    ) -> Result<Self, ScrollError> {
        if !offset_y.is_finite() {
            return Err(ScrollError::NonFiniteOffset(offset_y));
        }
        if !viewport_height_px.is_finite() || viewport_height_px <= 0.0 {
            return Err(ScrollError::InvalidViewportHeight(viewport_height_px));
        }
        if !row_height_px.is_finite() || row_height_px <= 0.0 {
            return Err(ScrollError::InvalidRowHeight(row_height_px));
        }
        Ok(Self {
            offset_y: offset_y.max(0.0),
            viewport_height_px,
            row_height_px,
        })
    }

    /// The validated (clamped) scroll offset
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// The first row index any part of which is inside the viewport
    pub fn first_visible_row(&self) -> i64 {
        (self.offset_y / self.row_height_px).floor() as i64
    }

    /// The last row index any part of which is inside the viewport
    pub fn last_visible_row(&self) -> i64 {
        ((self.offset_y + self.viewport_height_px) / self.row_height_px).ceil() as i64
    }
}

/// Which way the user must scroll to reach today's row
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TodayDirection {
    Up,
    Down,
}

/// The tracker's view of the world, updated on every scroll tick
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// The year last determined to be centred in the viewport
    last_known_year: i32,

    /// Whether the "jump to today" button is currently shown
    today_button_visible: bool,

    /// Which way the button points
    today_button_direction: TodayDirection,
}

impl ViewportState {
    /// The initial state for a grid built around `today`: that year, button
    /// hidden
    pub fn new(today: NaiveDate) -> Self {
        Self {
            last_known_year: today.year(),
            today_button_visible: false,
            today_button_direction: TodayDirection::Down,
        }
    }

    /// The year last determined to be centred in the viewport
    pub fn last_known_year(&self) -> i32 {
        self.last_known_year
    }

    /// Whether the "jump to today" button is currently shown
    pub fn today_button_visible(&self) -> bool {
        self.today_button_visible
    }

    /// Which way the button points
    pub fn today_button_direction(&self) -> TodayDirection {
        self.today_button_direction
    }
}

/// Changes a host rendering layer reacts to.  Both variants are
/// edge-triggered: they fire on the tick where the value changes, not on
/// every tick the value holds.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    /// The calendar year centred in the viewport changed
    YearChanged(i32),

    /// The "jump to today" button should be shown or hidden
    TodayButton {
        visible: bool,
        direction: TodayDirection,
    },
}

/// Tracks a scrolling viewport over a [`CalendarModel`].  Owned by the
/// enclosing view controller; not re-entrant (each scroll tick is handled
/// synchronously before the next).
pub struct ViewportTracker {
    state: ViewportState,
    events: Vec<ViewportEvent>,
}

impl ViewportTracker {
    /// Create a tracker for a grid built around `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: ViewportState::new(today),
            events: Vec::new(),
        }
    }

    /// The tracker's current state
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Borrow the events queued since the last drain
    pub fn events(&self) -> &[ViewportEvent] {
        &self.events
    }

    /// Drain the queued events for the host rendering layer
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, ViewportEvent> {
        self.events.drain(..)
    }

    /// Process one scroll tick: derive the centred year and today-button
    /// visibility, queueing an event for each value that changed.
    ///
    /// If today falls outside the model's range the button is never shown,
    /// regardless of scroll position.
    pub fn handle_scroll(&mut self, model: &CalendarModel, scroll: &ScrollInput) {
        let first_visible = scroll.first_visible_row();
        let last_visible = scroll.last_visible_row();
        trace!("Scroll tick: rows {first_visible}..={last_visible}");

        // One walk over the month groups finds both the month under the top
        // of the viewport and the row holding today
        let mut row_counter: i64 = 0;
        let mut current_year = self.state.last_known_year;
        let mut today_row: Option<i64> = None;
        for group in model.month_groups() {
            let row_span = group.row_count() as i64;
            if first_visible >= row_counter && first_visible < row_counter + row_span {
                current_year = group.year();
            }
            if today_row.is_none() {
                for (index, row) in group.rows().iter().enumerate() {
                    if row.contains_today() {
                        today_row = Some(row_counter + index as i64);
                        break;
                    }
                }
            }
            row_counter += row_span;
        }

        if current_year != self.state.last_known_year {
            self.state.last_known_year = current_year;
            self.events.push(ViewportEvent::YearChanged(current_year));
        }

        let Some(today_row) = today_row else {
            return;
        };

        let today_on_screen = today_row >= first_visible && today_row <= last_visible;
        let button_visible = !today_on_screen;
        if button_visible != self.state.today_button_visible {
            let direction = if today_row < first_visible {
                TodayDirection::Up
            } else {
                TodayDirection::Down
            };
            self.state.today_button_visible = button_visible;
            self.state.today_button_direction = direction;
            self.events.push(ViewportEvent::TodayButton {
                visible: button_visible,
                direction,
            });
        }
    }
}

/// The scroll offset that vertically centres today's row in the visible area
/// below the header.  `None` when today falls outside the model's range.
/// Used on initial mount and when the user taps the "jump to today" control.
pub fn centering_offset(model: &CalendarModel, layout: &GridLayout) -> Option<f64> {
    let today_row = model.today_row()? as f64;
    let visible_rows = layout.visible_row_count();
    let offset = (today_row - visible_rows / 2.0 + 0.5) * layout.row_height_px;
    Some(offset.max(0.0).floor())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MonthRange;

    fn day(ymd: &str) -> NaiveDate {
        ymd.parse().unwrap()
    }

    fn default_model() -> CalendarModel {
        CalendarModel::build(MonthRange::default(), day("2024-06-15")).unwrap()
    }

    fn scroll(offset: f64) -> ScrollInput {
        ScrollInput::new(offset, 800.0, 63.0).unwrap()
    }

    #[test]
    fn scroll_input_validation() {
        // Overscroll bounce clamps to zero
        assert_eq!(ScrollInput::new(-40.0, 800.0, 63.0).unwrap().offset_y(), 0.0);
        assert!(ScrollInput::new(f64::NAN, 800.0, 63.0).is_err());
        assert!(ScrollInput::new(0.0, f64::INFINITY, 63.0).is_err());
        assert!(ScrollInput::new(0.0, 800.0, 0.0).is_err());
    }

    #[test]
    fn visible_row_arithmetic() {
        let input = scroll(126.0);
        assert_eq!(input.first_visible_row(), 2);
        // ceil((126 + 800) / 63) = ceil(14.69) = 15
        assert_eq!(input.last_visible_row(), 15);
    }

    #[test]
    fn centering_puts_todays_row_in_view() {
        let model = default_model();
        let layout = GridLayout::default();
        let offset = centering_offset(&model, &layout).unwrap();
        assert!(offset >= 0.0);

        let input = scroll(offset);
        let today_row = model.today_row().unwrap() as i64;
        assert!(input.first_visible_row() <= today_row);
        assert!(today_row <= input.last_visible_row());
    }

    #[test]
    fn centering_is_none_when_today_is_out_of_range() {
        let range = MonthRange::from(1, 3).unwrap();
        let model = CalendarModel::build(range, day("2024-06-15")).unwrap();
        assert_eq!(centering_offset(&model, &GridLayout::default()), None);
    }

    #[test]
    fn today_button_events_are_edge_triggered() {
        let model = default_model();
        let mut tracker = ViewportTracker::new(day("2024-06-15"));

        // Centred on today: button stays hidden, year unchanged, no events
        let centre = centering_offset(&model, &GridLayout::default()).unwrap();
        tracker.handle_scroll(&model, &scroll(centre));
        assert!(tracker.events().is_empty());

        // Jiggle around the centre, today stays visible: still no events
        for delta in [-30.0, 30.0, -15.0, 45.0] {
            tracker.handle_scroll(&model, &scroll(centre + delta));
        }
        assert!(tracker.events().is_empty());

        // Scroll to the top of the grid: today leaves the viewport once
        tracker.handle_scroll(&model, &scroll(0.0));
        tracker.handle_scroll(&model, &scroll(10.0));
        tracker.handle_scroll(&model, &scroll(0.0));
        let events: Vec<ViewportEvent> = tracker.drain_events().collect();
        assert_eq!(
            events,
            vec![
                // The top of the grid is June 2023
                ViewportEvent::YearChanged(2023),
                ViewportEvent::TodayButton {
                    visible: true,
                    direction: TodayDirection::Down,
                },
            ]
        );

        // Back to the centre: one hide event (plus the year flipping back)
        tracker.handle_scroll(&model, &scroll(centre));
        let events: Vec<ViewportEvent> = tracker.drain_events().collect();
        assert_eq!(
            events,
            vec![
                ViewportEvent::YearChanged(2024),
                ViewportEvent::TodayButton {
                    visible: false,
                    direction: TodayDirection::Down,
                },
            ]
        );
    }

    #[test]
    fn button_points_up_when_today_is_above_the_viewport() {
        let model = default_model();
        let mut tracker = ViewportTracker::new(day("2024-06-15"));
        let today_row = model.today_row().unwrap() as f64;

        tracker.handle_scroll(&model, &scroll((today_row + 20.0) * 63.0));
        let events: Vec<ViewportEvent> = tracker.drain_events().collect();
        assert!(events.contains(&ViewportEvent::TodayButton {
            visible: true,
            direction: TodayDirection::Up,
        }));
    }

    #[test]
    fn button_never_shows_when_today_is_out_of_range() {
        let range = MonthRange::from(1, 3).unwrap();
        let model = CalendarModel::build(range, day("2024-06-15")).unwrap();
        let mut tracker = ViewportTracker::new(day("2024-06-15"));

        for offset in [0.0, 200.0, 1000.0, 5000.0] {
            tracker.handle_scroll(&model, &scroll(offset));
        }
        assert!(
            tracker
                .drain_events()
                .all(|event| !matches!(event, ViewportEvent::TodayButton { .. }))
        );
        assert!(!tracker.state().today_button_visible());
    }

    #[test]
    fn crossing_a_year_boundary_emits_one_year_change() {
        let model = default_model();
        let mut tracker = ViewportTracker::new(day("2024-06-15"));

        // Row index where January 2024 starts
        let mut january_start_row = 0i64;
        for group in model.month_groups() {
            if group.first_of_month() == day("2024-01-01") {
                break;
            }
            january_start_row += group.row_count() as i64;
        }

        // Park the top of the viewport in December 2023
        tracker.handle_scroll(&model, &scroll((january_start_row - 2) as f64 * 63.0));
        tracker.drain_events();

        // Step row by row across the boundary and a little beyond
        for row in (january_start_row - 1)..(january_start_row + 3) {
            tracker.handle_scroll(&model, &scroll(row as f64 * 63.0));
        }
        let year_changes: Vec<ViewportEvent> = tracker
            .drain_events()
            .filter(|event| matches!(event, ViewportEvent::YearChanged(_)))
            .collect();
        assert_eq!(year_changes, vec![ViewportEvent::YearChanged(2024)]);
        assert_eq!(tracker.state().last_known_year(), 2024);
    }
}
