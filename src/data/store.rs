use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use super::records::{BudgetRecord, StatRecord};
use crate::error::DashError;

/// Explicit link between a stats table and the budget table of the same company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub budget: String,
    pub stats: String,
}

/// Read-only tables loaded once at startup and shared by every callback.
#[derive(Debug)]
pub struct DataStore {
    budgets: BTreeMap<String, Vec<BudgetRecord>>,
    stats: BTreeMap<String, Vec<StatRecord>>,
    /// Keyed by stats key.
    pairings: BTreeMap<String, Pairing>,
    bounds: (NaiveDateTime, NaiveDateTime),
}

impl DataStore {
    /// Build the store, pairing every stats table with its budget table.
    ///
    /// A stats key pairs with the budget key of the same name. Fails when a
    /// stats table has no budget counterpart or when there are no budget rows.
    pub fn new(
        budgets: BTreeMap<String, Vec<BudgetRecord>>,
        stats: BTreeMap<String, Vec<StatRecord>>,
    ) -> Result<Self, DashError> {
        let unpaired: Vec<&str> = stats
            .keys()
            .filter(|k| !budgets.contains_key(k.as_str()))
            .map(String::as_str)
            .collect();
        if !unpaired.is_empty() {
            return Err(DashError::Load(format!(
                "stats tables without a budget table: {}",
                unpaired.join(", ")
            )));
        }

        let pairings = stats
            .keys()
            .map(|k| {
                (
                    k.clone(),
                    Pairing {
                        budget: k.clone(),
                        stats: k.clone(),
                    },
                )
            })
            .collect();

        let mut all = budgets.values().flatten().map(|r| r.datetime);
        let first = all
            .next()
            .ok_or_else(|| DashError::Load("no budget rows found".to_string()))?;
        let bounds = all.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));

        Ok(Self {
            budgets,
            stats,
            pairings,
            bounds,
        })
    }

    pub fn budget_keys(&self) -> Vec<&str> {
        self.budgets.keys().map(String::as_str).collect()
    }

    pub fn stats_keys(&self) -> Vec<&str> {
        self.stats.keys().map(String::as_str).collect()
    }

    pub fn budget(&self, company: &str) -> Result<&[BudgetRecord], DashError> {
        self.budgets
            .get(company)
            .map(Vec::as_slice)
            .ok_or_else(|| DashError::NotFound(format!("unknown company: {company}")))
    }

    pub fn stats(&self, stats_key: &str) -> Result<&[StatRecord], DashError> {
        self.stats
            .get(stats_key)
            .map(Vec::as_slice)
            .ok_or_else(|| DashError::NotFound(format!("unknown stats company: {stats_key}")))
    }

    pub fn pairing(&self, stats_key: &str) -> Result<&Pairing, DashError> {
        self.pairings
            .get(stats_key)
            .ok_or_else(|| DashError::NotFound(format!("no budget table paired with {stats_key}")))
    }

    pub fn paired_budget_key(&self, stats_key: &str) -> Result<&str, DashError> {
        self.pairing(stats_key).map(|p| p.budget.as_str())
    }

    /// Earliest and latest budget timestamp across all companies.
    pub fn date_bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        self.bounds
    }
}
