use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::DateRange;
use crate::data::{DataStore, StatRecord};
use crate::error::DashError;
use crate::figure::{Axis, Figure, Layout, Mode, Trace};

/// Number of metrics the comparison chart can draw: one per y-axis.
pub const MAX_PLOTTED_METRICS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Budget,
    Close,
    Volume,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Budget, Metric::Close, Metric::Volume];

    pub fn name(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }
}

/// One budget row matched with one stats row of the same timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub datetime: NaiveDateTime,
    pub budget: f64,
    pub close: f64,
    pub volume: f64,
}

impl JoinedRow {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Budget => self.budget,
            Metric::Close => self.close,
            Metric::Volume => self.volume,
        }
    }
}

/// Inner join of the in-range budget and stats rows on exact timestamp.
///
/// Budget order is kept; a budget row matching several stats rows appears
/// once per match, in stats order.
pub fn join_in_range(
    store: &DataStore,
    stats_key: &str,
    range: DateRange,
) -> Result<Vec<JoinedRow>, DashError> {
    let pairing = store.pairing(stats_key)?;
    let budget = store.budget(&pairing.budget)?;
    let stats = store.stats(&pairing.stats)?;

    let mut by_time: HashMap<NaiveDateTime, Vec<&StatRecord>> = HashMap::new();
    for s in stats.iter().filter(|s| range.contains(s.utc)) {
        by_time.entry(s.utc).or_default().push(s);
    }

    let mut joined = Vec::new();
    for b in budget.iter().filter(|b| range.contains(b.datetime)) {
        if let Some(matches) = by_time.get(&b.datetime) {
            joined.extend(matches.iter().map(|s| JoinedRow {
                datetime: b.datetime,
                budget: b.budget,
                close: s.close,
                volume: s.volume,
            }));
        }
    }
    Ok(joined)
}

/// Budget vs market chart for one stats company.
///
/// The first metric goes on the left axis and the second on an overlaid right
/// axis. Further metrics are not drawn.
pub fn stats_figure(
    store: &DataStore,
    stats_key: &str,
    metrics: &[Metric],
    range: DateRange,
) -> Result<Figure, DashError> {
    let joined = join_in_range(store, stats_key, range)?;
    if joined.is_empty() || metrics.is_empty() {
        return Ok(Figure::empty());
    }

    let plotted = &metrics[..metrics.len().min(MAX_PLOTTED_METRICS)];
    if plotted.len() < metrics.len() {
        tracing::debug!(
            "stats_figure: {stats_key}: drawing {} of {} metrics",
            plotted.len(),
            metrics.len()
        );
    }

    let mut data = Vec::with_capacity(plotted.len());
    for (idx, metric) in plotted.iter().enumerate() {
        let mut trace = Trace::new(Mode::Lines, metric.name());
        if idx > 0 {
            trace.yaxis = Some("y2");
        }
        for row in &joined {
            trace.push(row.datetime, row.value(*metric));
        }
        data.push(trace);
    }

    let names: Vec<&str> = plotted.iter().map(|m| m.name()).collect();
    let mut layout = Layout::titled(format!("{} для {stats_key}", names.join(", ")));
    layout.xaxis = Axis::titled("datetime");
    layout.yaxis = Axis::titled(plotted[0].name());
    if let Some(second) = plotted.get(1) {
        layout.yaxis2 = Some(Axis {
            overlaying: Some("y"),
            side: Some("right"),
            ..Axis::titled(second.name())
        });
    }

    tracing::debug!("stats_figure: {stats_key} -> {} joined rows", joined.len());
    Ok(Figure { data, layout })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BudgetRecord, Trend};
    use crate::figure::NO_DATA_TITLE;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 3, 7)
            .unwrap()
            .and_hms_opt(18, minute, 0)
            .unwrap()
    }

    fn budget(minute: u32, value: f64) -> BudgetRecord {
        BudgetRecord {
            datetime: at(minute),
            budget: value,
            strategy: "long".to_string(),
            trend: Trend::Green,
        }
    }

    fn stat(minute: u32, close: f64, volume: f64) -> StatRecord {
        StatRecord {
            utc: at(minute),
            close,
            volume,
        }
    }

    fn store() -> DataStore {
        let mut budgets = BTreeMap::new();
        budgets.insert(
            "SBER".to_string(),
            vec![budget(1, 100.0), budget(2, 110.0), budget(3, 120.0), budget(5, 130.0)],
        );
        budgets.insert("GAZP".to_string(), vec![budget(1, 5.0)]);
        let mut stats = BTreeMap::new();
        stats.insert(
            "SBER".to_string(),
            vec![stat(1, 10.0, 1000.0), stat(3, 12.0, 1200.0), stat(4, 13.0, 1300.0), stat(5, 14.0, 1400.0)],
        );
        DataStore::new(budgets, stats).unwrap()
    }

    fn full() -> DateRange {
        DateRange::new(at(0), at(59))
    }

    #[test]
    fn join_requires_exact_timestamps() {
        let rows = join_in_range(&store(), "SBER", full()).unwrap();
        let times: Vec<NaiveDateTime> = rows.iter().map(|r| r.datetime).collect();
        assert_eq!(times, vec![at(1), at(3), at(5)]);
        assert_eq!(rows[1].budget, 120.0);
        assert_eq!(rows[1].close, 12.0);
    }

    #[test]
    fn join_filters_both_sides_by_range() {
        let rows = join_in_range(&store(), "SBER", DateRange::new(at(2), at(4))).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].volume, 1200.0);
    }

    #[test]
    fn third_metric_is_not_drawn() {
        let fig = stats_figure(
            &store(),
            "SBER",
            &[Metric::Budget, Metric::Close, Metric::Volume],
            full(),
        )
        .unwrap();
        assert_eq!(fig.trace_names(), vec!["budget", "close"]);
        assert_eq!(fig.data[0].yaxis, None);
        assert_eq!(fig.data[1].yaxis, Some("y2"));
        assert_eq!(fig.data[1].y, vec![10.0, 12.0, 14.0]);

        let y2 = fig.layout.yaxis2.as_ref().unwrap();
        assert_eq!(y2.overlaying, Some("y"));
        assert_eq!(y2.side, Some("right"));
        assert_eq!(y2.title.as_ref().unwrap().text, "close");
        assert_eq!(fig.layout.title.text, "budget, close для SBER");
    }

    #[test]
    fn single_metric_has_no_secondary_axis() {
        let fig = stats_figure(&store(), "SBER", &[Metric::Volume], full()).unwrap();
        assert_eq!(fig.trace_names(), vec!["volume"]);
        assert!(fig.layout.yaxis2.is_none());
    }

    #[test]
    fn unpaired_stats_key_is_lookup_failure() {
        let err = stats_figure(&store(), "GAZP", &[Metric::Budget], full());
        assert!(matches!(err, Err(DashError::NotFound(_))));
    }

    #[test]
    fn empty_join_or_no_metrics_is_placeholder() {
        let fig = stats_figure(&store(), "SBER", &[Metric::Close], DateRange::new(at(2), at(2))).unwrap();
        assert!(fig.is_empty());
        assert_eq!(fig.layout.title.text, NO_DATA_TITLE);

        assert!(stats_figure(&store(), "SBER", &[], full()).unwrap().is_empty());
    }

    #[test]
    fn metrics_deserialise_from_lowercase_names() {
        let metrics: Vec<Metric> = serde_json::from_str(r#"["budget","volume"]"#).unwrap();
        assert_eq!(metrics, vec![Metric::Budget, Metric::Volume]);
        assert!(serde_json::from_str::<Vec<Metric>>(r#"["open"]"#).is_err());
    }
}
