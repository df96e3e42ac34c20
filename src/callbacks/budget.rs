use super::DateRange;
use crate::data::DataStore;
use crate::error::DashError;
use crate::figure::{Axis, Figure, Layout, Mode, Trace};

pub const BUDGET_TITLE: &str = "Бюджет по времени";

/// Budget-over-time lines, one per selected company, limited to `range`.
///
/// Companies are drawn in selection order; a company with no rows in range
/// gets no trace. An empty selection yields the placeholder chart; an unknown
/// company is a lookup failure.
pub fn budget_figure(
    store: &DataStore,
    companies: &[String],
    range: DateRange,
) -> Result<Figure, DashError> {
    if companies.is_empty() {
        return Ok(Figure::empty());
    }

    let mut data = Vec::with_capacity(companies.len());
    for company in companies {
        let mut trace = Trace::new(Mode::Lines, company.as_str());
        for rec in store.budget(company)? {
            if range.contains(rec.datetime) {
                trace.push(rec.datetime, rec.budget);
            }
        }
        tracing::debug!("budget_figure: {company} -> {} points", trace.len());
        if !trace.is_empty() {
            data.push(trace);
        }
    }

    let mut layout = Layout::titled(BUDGET_TITLE);
    layout.xaxis = Axis::titled("datetime");
    layout.yaxis = Axis::titled("budget");
    Ok(Figure { data, layout })
}
