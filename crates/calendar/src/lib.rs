// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Monolift project*
//!
//! The Monolift calendar engine.  This crate turns a signed month range into a
//! flat, row-organised calendar grid (weeks of 7 cells, month boundaries
//! marked, "today" flagged), and tracks a scrolling viewport over that grid:
//! which calendar year is centred, and whether today's row is on screen.
//!
//! The engine is pure data: it never draws, never reads a clock (the caller
//! injects "today"), and performs no I/O.  A host rendering layer consumes
//! [`CalendarModel`] and the events drained from [`ViewportTracker`].
//!

mod grid;
mod layout;
mod range;
mod viewport;

pub use grid::*;
pub use layout::*;
pub use range::*;
pub use viewport::*;
