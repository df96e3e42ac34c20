//! Pure callbacks behind the dashboard controls.
//!
//! Each callback takes the current control values plus the read-only
//! [`DataStore`](crate::data::DataStore) and returns the new value of one
//! output: a clamped selection, an option list or a figure.

pub mod budget;
pub mod selection;
pub mod stats;
pub mod strategy;

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

pub use budget::budget_figure;
pub use selection::clamp_selection;
pub use stats::{stats_figure, Metric};
pub use strategy::{strategy_figure, strategy_options};

/// Inclusive date window picked on a range slider.
///
/// Arrives as `[start, end]` in epoch seconds; fractional seconds are floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "[f64; 2]")]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn from_epoch_secs(start: f64, end: f64) -> Result<Self, String> {
        Ok(Self {
            start: epoch_to_naive(start)?,
            end: epoch_to_naive(end)?,
        })
    }

    /// Both bounds inclusive; a reversed range contains nothing.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

impl TryFrom<[f64; 2]> for DateRange {
    type Error = String;

    fn try_from([start, end]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::from_epoch_secs(start, end)
    }
}

fn epoch_to_naive(secs: f64) -> Result<NaiveDateTime, String> {
    if !secs.is_finite() {
        return Err(format!("timestamp out of range: {secs}"));
    }
    let floored = secs.floor();
    if floored < i64::MIN as f64 || floored > i64::MAX as f64 {
        return Err(format!("timestamp out of range: {secs}"));
    }
    DateTime::from_timestamp(floored as i64, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| format!("timestamp out of range: {secs}"))
}
