// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! CRUD exercises, templates, and sessions
//!

mod common;
mod exercise;
mod session;
mod template;
mod workout_dates;

pub use common::*;
pub use exercise::*;
pub use session::*;
pub use template::*;
pub use workout_dates::*;
