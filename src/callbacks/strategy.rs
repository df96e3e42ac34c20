use std::collections::{HashMap, HashSet};

use super::DateRange;
use crate::data::{DataStore, Trend};
use crate::error::DashError;
use crate::figure::{Axis, Figure, Layout, Legend, Marker, Mode, Title, Trace};
use crate::layout::SelectOption;

pub const LEGEND_TITLE: &str = "Тенденция";

/// Distinct strategies of `company` in first-seen order, over the whole table.
pub fn strategy_options(store: &DataStore, company: &str) -> Result<Vec<SelectOption>, DashError> {
    let mut seen = HashSet::new();
    let options: Vec<SelectOption> = store
        .budget(company)?
        .iter()
        .filter(|r| seen.insert(r.strategy.as_str()))
        .map(|r| SelectOption::same(&r.strategy))
        .collect();
    tracing::debug!("strategy_options: {company} -> {} strategies", options.len());
    Ok(options)
}

/// Scatter of `company`'s budget restricted to `range` and `strategies`,
/// colored by trend.
///
/// One trace per trend actually present, always in the up / flat / down
/// order with fixed colors.
pub fn strategy_figure(
    store: &DataStore,
    company: &str,
    strategies: &[String],
    range: DateRange,
) -> Result<Figure, DashError> {
    let records = store.budget(company)?;
    let wanted: HashSet<&str> = strategies.iter().map(String::as_str).collect();

    let mut by_trend: HashMap<Trend, Trace> = HashMap::new();
    for rec in records
        .iter()
        .filter(|r| range.contains(r.datetime) && wanted.contains(r.strategy.as_str()))
    {
        by_trend
            .entry(rec.trend)
            .or_insert_with(|| {
                let mut trace = Trace::new(Mode::Markers, rec.trend.label());
                trace.marker = Some(Marker {
                    color: rec.trend.color(),
                });
                trace
            })
            .push(rec.datetime, rec.budget);
    }

    if by_trend.is_empty() {
        return Ok(Figure::empty());
    }

    let data: Vec<Trace> = Trend::DISPLAY_ORDER
        .iter()
        .filter_map(|t| by_trend.remove(t))
        .collect();

    let mut layout = Layout::titled(format!("Бюджет по стратегиям для {company}"));
    layout.xaxis = Axis::titled("datetime");
    layout.yaxis = Axis::titled("budget");
    layout.legend = Some(Legend {
        title: Title::new(LEGEND_TITLE),
        orientation: "h",
        yanchor: "bottom",
        y: -0.3,
        xanchor: "center",
        x: 0.5,
    });
    Ok(Figure { data, layout })
}
