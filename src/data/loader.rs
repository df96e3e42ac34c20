use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::records::{BudgetRecord, RawBudgetRow, RawStatRow, StatRecord};
use super::store::DataStore;
use crate::error::DashError;

/// File naming conventions used to discover the two table families.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub budget_suffix: String,
    pub stats_suffix: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            budget_suffix: "38.csv".to_string(),
            stats_suffix: "_1_min.csv".to_string(),
        }
    }
}

/// List `(key, path)` for every regular file in `dir` whose name ends with
/// `suffix`, where `key` is the name with the suffix stripped. Sorted by key.
pub fn scan_dir(dir: &Path, suffix: &str) -> Result<Vec<(String, PathBuf)>, DashError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| DashError::Load(format!("cannot read data dir {}: {e}", dir.display())))?;

    let mut found: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(key) = name.strip_suffix(suffix) {
            if key.is_empty() {
                return Err(DashError::Load(format!("{name}: file name has no company part")));
            }
            found.push((key.to_string(), entry.path()));
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

/// Deserialize every row of a CSV file, converting each into its record type.
fn read_rows<R, T>(path: &Path) -> Result<Vec<T>, DashError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = DashError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<R>().enumerate() {
        let raw = result?;
        // +2: one for the header, one for 1-based lines.
        let record = T::try_from(raw)
            .map_err(|e| match e {
                DashError::Load(msg) => DashError::Load(format!("line {}: {msg}", idx + 2)),
                other => other,
            })?;
        rows.push(record);
    }
    Ok(rows)
}

/// Load one budget/strategy table, sorted by timestamp (stable for ties).
pub fn load_budget_file(path: &Path) -> Result<Vec<BudgetRecord>, DashError> {
    let mut rows: Vec<BudgetRecord> = read_rows::<RawBudgetRow, _>(path)
        .map_err(|e| e.in_file(&path.display().to_string()))?;
    rows.sort_by_key(|r| r.datetime);
    Ok(rows)
}

/// Load one per-minute stats table, sorted by timestamp (stable for ties).
pub fn load_stats_file(path: &Path) -> Result<Vec<StatRecord>, DashError> {
    let mut rows: Vec<StatRecord> = read_rows::<RawStatRow, _>(path)
        .map_err(|e| e.in_file(&path.display().to_string()))?;
    rows.sort_by_key(|r| r.utc);
    Ok(rows)
}

/// Scan `dir` once and build the read-only store.
///
/// Any unreadable file, malformed row or unpaired stats table fails the
/// whole load.
pub fn load_data_store(dir: &Path, opts: &LoadOptions) -> Result<DataStore, DashError> {
    let start = Instant::now();

    let mut budgets: BTreeMap<String, Vec<BudgetRecord>> = BTreeMap::new();
    for (key, path) in scan_dir(dir, &opts.budget_suffix)? {
        tracing::debug!("Loading budget table {key} from {}", path.display());
        budgets.insert(key, load_budget_file(&path)?);
    }

    let mut stats: BTreeMap<String, Vec<StatRecord>> = BTreeMap::new();
    for (key, path) in scan_dir(dir, &opts.stats_suffix)? {
        tracing::debug!("Loading stats table {key} from {}", path.display());
        stats.insert(key, load_stats_file(&path)?);
    }

    let budget_rows: usize = budgets.values().map(Vec::len).sum();
    let stats_rows: usize = stats.values().map(Vec::len).sum();

    let store = DataStore::new(budgets, stats)?;

    tracing::info!(
        "Loaded {} budget tables ({budget_rows} rows) and {} stats tables ({stats_rows} rows) from {} in {:.1?}",
        store.budget_keys().len(),
        store.stats_keys().len(),
        dir.display(),
        start.elapsed(),
    );
    Ok(store)
}
