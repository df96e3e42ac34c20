//! Static declaration of the dashboard page.
//!
//! The browser fetches this once, builds the controls from it and wires each
//! control to its callback endpoint by id.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::callbacks::Metric;
use crate::data::DataStore;

/// Drawing tools added to every graph's mode bar.
pub const DRAW_BUTTONS: [&str; 4] = ["drawline", "drawopenpath", "drawrect", "eraseshape"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    /// Option whose label is its value.
    pub fn same(value: &str) -> Self {
        Self {
            label: value.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    Checklist {
        id: &'static str,
        options: Vec<SelectOption>,
        value: Vec<String>,
        inline: bool,
    },
    Dropdown {
        id: &'static str,
        options: Vec<SelectOption>,
        value: Option<String>,
        clearable: bool,
    },
    RangeSlider {
        id: &'static str,
        min: i64,
        max: i64,
        value: [i64; 2],
        step: i64,
        marks: BTreeMap<i64, String>,
    },
    Graph {
        id: &'static str,
        mode_bar_buttons_to_add: Vec<&'static str>,
    },
}

impl Control {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Checklist { id, .. }
            | Self::Dropdown { id, .. }
            | Self::RangeSlider { id, .. }
            | Self::Graph { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub heading: &'static str,
    pub controls: Vec<Control>,
}

impl Panel {
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id() == id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub panels: Vec<Panel>,
}

impl Page {
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.panels.iter().find_map(|p| p.control(id))
    }
}

/// Slider marks every `tick_days` days from `start` up to `end`, keyed by
/// epoch seconds and labelled `YYYY-MM-DD`.
pub fn slider_marks(start: NaiveDateTime, end: NaiveDateTime, tick_days: u32) -> BTreeMap<i64, String> {
    let step = Duration::days(i64::from(tick_days.max(1)));
    let mut marks = BTreeMap::new();
    let mut t = start;
    while t <= end {
        marks.insert(t.and_utc().timestamp(), t.format("%Y-%m-%d").to_string());
        t += step;
    }
    marks
}

fn range_slider(id: &'static str, store: &DataStore, tick_days: u32) -> Control {
    let (start, end) = store.date_bounds();
    let (min, max) = (start.and_utc().timestamp(), end.and_utc().timestamp());
    Control::RangeSlider {
        id,
        min,
        max,
        value: [min, max],
        step: i64::from(tick_days.max(1)) * 86_400,
        marks: slider_marks(start, end, tick_days),
    }
}

fn graph(id: &'static str) -> Control {
    Control::Graph {
        id,
        mode_bar_buttons_to_add: DRAW_BUTTONS.to_vec(),
    }
}

fn options(keys: &[&str]) -> Vec<SelectOption> {
    keys.iter().map(|k| SelectOption::same(k)).collect()
}

/// Declare the three dashboard panels from the loaded keys and date bounds.
pub fn build_page(store: &DataStore, tick_days: u32) -> Page {
    let budget_keys = store.budget_keys();
    let stats_keys = store.stats_keys();

    let budget = Panel {
        heading: "Торги акцией по стратегии long-short с обновлением каждый месяц (выбор 2 компаний)",
        controls: vec![
            Control::Checklist {
                id: "company-selector",
                options: options(&budget_keys),
                value: budget_keys.iter().take(2).map(|k| k.to_string()).collect(),
                inline: true,
            },
            range_slider("date-slider-budget", store, tick_days),
            graph("budget-graph"),
        ],
    };

    let strategy = Panel {
        heading: "Результаты по отдельным действиям модели OMG",
        controls: vec![
            Control::Dropdown {
                id: "single-company-selector",
                options: options(&budget_keys),
                value: budget_keys.first().map(|k| k.to_string()),
                clearable: false,
            },
            Control::Checklist {
                id: "strategy-selector",
                options: Vec::new(),
                value: Vec::new(),
                inline: true,
            },
            range_slider("date-slider-strategy", store, tick_days),
            graph("strategy-graph"),
        ],
    };

    let stats = Panel {
        heading: "Сравнение динамики бюджета с динамикой цены закрытия/объема",
        controls: vec![
            Control::Dropdown {
                id: "stats-company-selector",
                options: options(&stats_keys),
                value: stats_keys.first().map(|k| k.to_string()),
                clearable: false,
            },
            Control::Checklist {
                id: "stats-metric-selector",
                options: Metric::ALL
                    .iter()
                    .map(|m| SelectOption {
                        label: m.label().to_string(),
                        value: m.name().to_string(),
                    })
                    .collect(),
                value: vec![Metric::Budget.name().to_string(), Metric::Close.name().to_string()],
                inline: true,
            },
            range_slider("date-slider-stats", store, tick_days),
            graph("stats-graph"),
        ],
    };

    Page {
        panels: vec![budget, strategy, stats],
    }
}
