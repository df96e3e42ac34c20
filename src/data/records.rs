use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DashError;

/// Budget direction indicator carried by each budget row as `red`/`green`/`gray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Red,
    Green,
    Gray,
}

impl Trend {
    /// Legend order of the strategy scatter, independent of which trends are present.
    pub const DISPLAY_ORDER: [Trend; 3] = [Trend::Green, Trend::Gray, Trend::Red];

    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "Бюджет упал",
            Self::Green => "Бюджет вырос",
            Self::Gray => "Без изменений",
        }
    }

    /// Marker color; the raw indicator doubles as a CSS color name.
    pub fn color(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Gray => "gray",
        }
    }
}

impl FromStr for Trend {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "gray" => Ok(Self::Gray),
            other => Err(DashError::Load(format!("unknown trend color: {other:?}"))),
        }
    }
}

/// One row of a budget/strategy table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRecord {
    pub datetime: NaiveDateTime,
    pub budget: f64,
    pub strategy: String,
    pub trend: Trend,
}

/// One row of a per-minute market stats table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRecord {
    pub utc: NaiveDateTime,
    pub close: f64,
    pub volume: f64,
}

// ── CSV rows ─────────────────────────────────────────────────────────────
//
// Blank numeric cells load as NaN and draw as gaps.

#[derive(Debug, Deserialize)]
pub(crate) struct RawBudgetRow {
    datetime: String,
    budget: Option<f64>,
    strategy: String,
    color: String,
}

impl TryFrom<RawBudgetRow> for BudgetRecord {
    type Error = DashError;

    fn try_from(row: RawBudgetRow) -> Result<Self, Self::Error> {
        Ok(Self {
            datetime: parse_timestamp(&row.datetime)?,
            budget: row.budget.unwrap_or(f64::NAN),
            strategy: row.strategy,
            trend: row.color.parse()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStatRow {
    utc: String,
    close: Option<f64>,
    volume: Option<f64>,
}

impl TryFrom<RawStatRow> for StatRecord {
    type Error = DashError;

    fn try_from(row: RawStatRow) -> Result<Self, Self::Error> {
        Ok(Self {
            utc: parse_timestamp(&row.utc)?,
            close: row.close.unwrap_or(f64::NAN),
            volume: row.volume.unwrap_or(f64::NAN),
        })
    }
}

// ── Timestamps ───────────────────────────────────────────────────────────

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Parse a timestamp written in any of the ISO-like layouts found in the
/// exports, mixed freely within one file.
///
/// Zoned values are converted to UTC and the zone dropped. The result is
/// truncated to whole seconds so budget and stats rows join on equality.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DashError> {
    let s = raw.trim();

    let parsed = DateTime::parse_from_rfc3339(s)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        })
        .map(|dt| dt.naive_utc())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| DashError::Load(format!("unparsable timestamp: {raw:?}")))?;

    Ok(parsed.with_nanosecond(0).unwrap_or(parsed))
}
