// SPDX-License-Identifier: MIT

//!
//! The calendar grid model and its builder
//!

use crate::{CalendarError, MonthRange};
use chrono::{Datelike, Days, Months, NaiveDate};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

/// Cells per week row (Sunday-first)
pub const DAYS_PER_WEEK: usize = 7;

/// Month abbreviations, used to label the 1st of each month in the grid
pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The Sunday on or before the given date
pub(crate) fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// The first of the month `offset` months away from `today`'s month
fn shifted_month_start(today: NaiveDate, offset: i32) -> Result<NaiveDate, CalendarError> {
    let first = today
        .with_day(1)
        .ok_or(CalendarError::MonthOutOfBounds(offset))?;
    let shifted = if offset >= 0 {
        first.checked_add_months(Months::new(offset as u32))
    } else {
        first.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    shifted.ok_or(CalendarError::MonthOutOfBounds(offset))
}

/// One dated cell of the calendar grid
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    /// The cell's calendar date
    date: NaiveDate,

    /// Whether the date equals the injected "today"
    is_today: bool,

    /// Whether the date falls in the real-world current month (used to dim
    /// out-of-month padding cells).  This flags today's month, not the month
    /// the row belongs to.
    is_current_month: bool,

    /// Whether a workout was logged on this date.  Populated by
    /// [`CalendarModel::mark_workout_days`], false until then.
    has_workout: bool,
}

impl CalendarDay {
    /// Create a [`CalendarDay`], deriving its flags from the injected `today`
    pub fn new(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            is_today: date == today,
            is_current_month: date.year() == today.year() && date.month() == today.month(),
            has_workout: false,
        }
    }

    /// The cell's calendar date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether the date equals the injected "today"
    pub fn is_today(&self) -> bool {
        self.is_today
    }

    /// Whether the date falls in the real-world current month
    pub fn is_current_month(&self) -> bool {
        self.is_current_month
    }

    /// Whether a workout was logged on this date
    pub fn has_workout(&self) -> bool {
        self.has_workout
    }

    /// Whether this is the 1st of its month (the cell that carries the month
    /// abbreviation label)
    pub fn is_first_of_month(&self) -> bool {
        self.date.day() == 1
    }
}

/// One grid position: either a dated day or blank padding.  Padding keeps the
/// 7-column layout fixed and must render as blank space, never as a day.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Day(CalendarDay),
    Empty,
}

impl Cell {
    /// The day in this cell, if it has one
    pub fn day(&self) -> Option<&CalendarDay> {
        match self {
            Cell::Day(day) => Some(day),
            Cell::Empty => None,
        }
    }

    /// Whether this cell is blank padding
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// One week row of the grid: always exactly 7 cells, Sunday-first, with
/// [`Cell::Empty`] padding only at the tail
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WeekRow {
    cells: [Cell; DAYS_PER_WEEK],
    is_last_in_month: bool,
}

impl WeekRow {
    fn from_days(days: &[CalendarDay], is_last_in_month: bool) -> Self {
        let mut cells = [Cell::Empty; DAYS_PER_WEEK];
        for (index, day) in days.iter().take(DAYS_PER_WEEK).enumerate() {
            cells[index] = Cell::Day(*day);
        }
        Self {
            cells,
            is_last_in_month,
        }
    }

    /// Borrow the row's 7 cells
    pub fn cells(&self) -> &[Cell; DAYS_PER_WEEK] {
        &self.cells
    }

    /// Iterate the row's dated cells (the non-padding prefix)
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().filter_map(Cell::day)
    }

    /// Whether this is the final row produced for its owning month
    pub fn is_last_in_month(&self) -> bool {
        self.is_last_in_month
    }

    /// Whether the row contains the cell flagged as today
    pub fn contains_today(&self) -> bool {
        self.days().any(CalendarDay::is_today)
    }
}

/// The rows of one calendar month, including leading padding days borrowed
/// from the previous month and excluding trailing days that render as the
/// next month's leading padding instead
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MonthGroup {
    first_of_month: NaiveDate,
    rows: Vec<WeekRow>,
}

impl MonthGroup {
    /// The 1st of the month this group renders
    pub fn first_of_month(&self) -> NaiveDate {
        self.first_of_month
    }

    /// The month's real calendar year
    pub fn year(&self) -> i32 {
        self.first_of_month.year()
    }

    /// The month's abbreviation (e.g. "Jan")
    pub fn month_abbrev(&self) -> &'static str {
        MONTH_ABBREVS[self.first_of_month.month0() as usize]
    }

    /// Borrow the month's week rows
    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    /// How many week rows the month renders as
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The full calendar grid for a month range.  Built once per range
/// configuration and immutable thereafter; the only mutation is
/// [`mark_workout_days`](CalendarModel::mark_workout_days), the pass-through
/// slot an external workout-data provider fills.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CalendarModel {
    range: MonthRange,
    today: NaiveDate,
    month_groups: Vec<MonthGroup>,
}

impl CalendarModel {
    /// Build the grid for the given range around the injected `today`.
    ///
    /// Each calendar date in the spanned months appears in exactly one row:
    /// days of a month that fall on or after the Sunday starting the next
    /// month's first row are rendered as that month's leading padding instead
    /// of as trailing days of their own month.
    pub fn build(range: MonthRange, today: NaiveDate) -> Result<Self, CalendarError> {
        let mut month_groups = Vec::with_capacity(range.month_count() as usize);

        for offset in range.offsets() {
            let first_of_month = shifted_month_start(today, offset)?;
            let first_of_next = shifted_month_start(today, offset + 1)?;
            let day_count = (first_of_next - first_of_month).num_days();

            // The Sunday starting the next month's first row, when a next
            // month exists in the range
            let dedup_cutoff =
                (offset < range.end() - 1).then(|| week_start(first_of_next));

            let mut days = Vec::with_capacity(day_count as usize + DAYS_PER_WEEK - 1);

            // Leading padding borrowed from the previous month, so the first
            // row starts on a Sunday
            let lead = u64::from(first_of_month.weekday().num_days_from_sunday());
            for back in (1..=lead).rev() {
                days.push(CalendarDay::new(first_of_month - Days::new(back), today));
            }

            for day_number in 0..day_count as u64 {
                let date = first_of_month + Days::new(day_number);
                if let Some(cutoff) = dedup_cutoff {
                    if date >= cutoff {
                        break;
                    }
                }
                days.push(CalendarDay::new(date, today));
            }

            let row_count = days.len().div_ceil(DAYS_PER_WEEK);
            let rows = days
                .chunks(DAYS_PER_WEEK)
                .enumerate()
                .map(|(index, chunk)| WeekRow::from_days(chunk, index + 1 == row_count))
                .collect();

            month_groups.push(MonthGroup {
                first_of_month,
                rows,
            });
        }

        let model = Self {
            range,
            today,
            month_groups,
        };
        debug!(
            "Built calendar model: {} months, {} rows",
            model.month_groups.len(),
            model.total_rows()
        );
        Ok(model)
    }

    /// The month range the grid spans
    pub fn range(&self) -> MonthRange {
        self.range
    }

    /// The injected "today" the grid was built around
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Borrow the grid's month groups, in range order
    pub fn month_groups(&self) -> &[MonthGroup] {
        &self.month_groups
    }

    /// Total week rows across all months
    pub fn total_rows(&self) -> usize {
        self.month_groups.iter().map(MonthGroup::row_count).sum()
    }

    /// Iterate every dated cell in the grid, in row order
    pub fn iter_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.month_groups
            .iter()
            .flat_map(|group| group.rows.iter())
            .flat_map(WeekRow::days)
    }

    /// The global row index containing today's cell, if today falls within
    /// the range
    pub fn today_row(&self) -> Option<usize> {
        let mut row_counter = 0;
        for group in &self.month_groups {
            for row in &group.rows {
                if row.contains_today() {
                    return Some(row_counter);
                }
                row_counter += 1;
            }
        }
        None
    }

    /// Fill the `has_workout` flag from the set of dates the workout store
    /// reports sessions on.  Dates absent from the set are cleared, so
    /// re-marking after a data refresh is safe.
    pub fn mark_workout_days(&mut self, workout_days: &BTreeSet<NaiveDate>) {
        for group in &mut self.month_groups {
            for row in &mut group.rows {
                for cell in &mut row.cells {
                    if let Cell::Day(day) = cell {
                        day.has_workout = workout_days.contains(&day.date);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn day(ymd: &str) -> NaiveDate {
        ymd.parse().unwrap()
    }

    fn default_model() -> CalendarModel {
        CalendarModel::build(MonthRange::default(), day("2024-06-15")).unwrap()
    }

    #[test]
    fn days_are_consecutive_with_no_gaps_or_duplicates() {
        let model = default_model();
        let dates: Vec<NaiveDate> = model.iter_days().map(CalendarDay::date).collect();

        // Starts on the Sunday beginning the first month's first row and ends
        // on the last day of the final month in the range
        assert_eq!(dates[0], week_start(day("2023-06-01")));
        assert_eq!(*dates.last().unwrap(), day("2027-05-31"));

        // Globally consecutive: every date in between appears exactly once
        for pair in dates.windows(2) {
            assert_eq!(pair[1], pair[0] + Days::new(1));
        }
    }

    #[test]
    fn exactly_one_today_marker() {
        let model = default_model();
        let todays: Vec<&CalendarDay> =
            model.iter_days().filter(|d| d.is_today()).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date(), day("2024-06-15"));
    }

    #[test]
    fn no_today_marker_when_range_excludes_today() {
        let range = MonthRange::from(1, 3).unwrap();
        let model = CalendarModel::build(range, day("2024-06-15")).unwrap();
        assert_eq!(model.iter_days().filter(|d| d.is_today()).count(), 0);
        assert_eq!(model.today_row(), None);
    }

    #[test]
    fn rows_are_seven_wide_with_padding_only_at_the_tail() {
        let model = default_model();
        let group_count = model.month_groups().len();
        for (group_index, group) in model.month_groups().iter().enumerate() {
            for row in group.rows() {
                // Days form a prefix; padding cells only follow them
                let mut seen_empty = false;
                for cell in row.cells() {
                    match cell {
                        Cell::Empty => seen_empty = true,
                        Cell::Day(_) => assert!(!seen_empty),
                    }
                }
            }
            // Months that hand their tail to the next month always chunk into
            // full weeks; only the final month may end with a short row
            if group_index + 1 < group_count {
                for row in group.rows() {
                    assert_eq!(row.days().count(), DAYS_PER_WEEK);
                }
            }
        }
    }

    #[test]
    fn rows_hold_consecutive_increasing_dates() {
        let model = default_model();
        for group in model.month_groups() {
            for row in group.rows() {
                let dates: Vec<NaiveDate> = row.days().map(CalendarDay::date).collect();
                for pair in dates.windows(2) {
                    assert_eq!(pair[1], pair[0] + Days::new(1));
                }
            }
        }
    }

    #[test]
    fn last_row_of_each_month_is_flagged() {
        let model = default_model();
        for group in model.month_groups() {
            let rows = group.rows();
            for (index, row) in rows.iter().enumerate() {
                assert_eq!(row.is_last_in_month(), index + 1 == rows.len());
            }
        }
        let flagged = model
            .month_groups()
            .iter()
            .flat_map(MonthGroup::rows)
            .filter(|row| row.is_last_in_month())
            .count();
        assert_eq!(flagged, model.month_groups().len());
    }

    #[test]
    fn trailing_days_render_as_the_next_months_leading_padding() {
        let model = default_model();
        // 2024-07-01 is a Monday, so its first row starts on Sunday June 30th:
        // June's group must stop at the 29th and July's must start on the 30th
        let june = &model.month_groups()[12];
        assert_eq!(june.first_of_month(), day("2024-06-01"));
        let last_june_day = june.rows().last().unwrap().days().last().unwrap().date();
        assert_eq!(last_june_day, day("2024-06-29"));

        let july = &model.month_groups()[13];
        let first_july_cell = july.rows()[0].days().next().unwrap();
        assert_eq!(first_july_cell.date(), day("2024-06-30"));
        // That borrowed day still belongs to the real-world current month
        assert!(first_july_cell.is_current_month());
    }

    #[test]
    fn month_starting_on_sunday_gets_no_leading_padding() {
        let model = default_model();
        // 2024-09-01 is a Sunday
        let september = &model.month_groups()[15];
        assert_eq!(september.first_of_month(), day("2024-09-01"));
        assert_eq!(
            september.rows()[0].days().next().unwrap().date(),
            day("2024-09-01")
        );
        // August keeps its full tail since nothing falls in September's first row
        let august = &model.month_groups()[14];
        let last_august_day = august.rows().last().unwrap().days().last().unwrap().date();
        assert_eq!(last_august_day, day("2024-08-31"));
    }

    #[test]
    fn current_month_flag_follows_todays_month_not_the_group() {
        let model = default_model();
        let june = &model.month_groups()[12];
        // June's leading padding comes from May and must not be flagged
        let first_cell = june.rows()[0].days().next().unwrap();
        assert_eq!(first_cell.date(), day("2024-05-26"));
        assert!(!first_cell.is_current_month());
        // Every real June day is flagged
        for cell in june.rows().iter().flat_map(WeekRow::days) {
            assert_eq!(cell.is_current_month(), cell.date().month() == 6);
        }
    }

    #[test]
    fn leap_february_is_complete() {
        let range = MonthRange::from(-1, 2).unwrap();
        let model = CalendarModel::build(range, day("2024-02-10")).unwrap();
        assert!(
            model
                .iter_days()
                .any(|cell| cell.date() == day("2024-02-29"))
        );
    }

    #[test]
    fn build_is_idempotent() {
        let range = MonthRange::default();
        let first = CalendarModel::build(range, day("2024-06-15")).unwrap();
        let second = CalendarModel::build(range, day("2024-06-15")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn month_abbrev_labels() {
        let model = default_model();
        assert_eq!(model.month_groups()[12].month_abbrev(), "Jun");
        assert_eq!(model.month_groups()[12].year(), 2024);
        assert_eq!(model.month_groups()[0].month_abbrev(), "Jun");
        assert_eq!(model.month_groups()[0].year(), 2023);
    }

    #[test]
    fn mark_workout_days_is_a_pass_through_slot() {
        let mut model = default_model();
        assert!(model.iter_days().all(|cell| !cell.has_workout()));

        let mut workout_days = BTreeSet::new();
        workout_days.insert(day("2024-06-15"));
        workout_days.insert(day("2024-06-10"));
        // Outside the range: silently ignored
        workout_days.insert(day("2030-01-01"));

        model.mark_workout_days(&workout_days);
        let marked: Vec<NaiveDate> = model
            .iter_days()
            .filter(|cell| cell.has_workout())
            .map(CalendarDay::date)
            .collect();
        assert_eq!(marked, vec![day("2024-06-10"), day("2024-06-15")]);

        // Re-marking with fresh data clears stale flags
        model.mark_workout_days(&BTreeSet::new());
        assert!(model.iter_days().all(|cell| !cell.has_workout()));
    }
}
