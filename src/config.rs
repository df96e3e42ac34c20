use std::env;
use std::path::PathBuf;

/// Dashboard configuration derived from environment variables.
///
/// `main` may override the bind address, port and directories from the
/// command line after this is built.
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub bind: String,
    pub port: u16,

    // ── Input files ────────────────────────────────────────────────
    pub data_dir: PathBuf,
    /// File name suffix of budget/strategy tables, e.g. `SBER38.csv`.
    pub budget_suffix: String,
    /// File name suffix of per-minute market stats, e.g. `SBER_1_min.csv`.
    pub stats_suffix: String,

    // ── Page ───────────────────────────────────────────────────────
    pub frontend_dir: PathBuf,
    pub tick_days: u32,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_path(name: &str, default: &str) -> PathBuf {
    PathBuf::from(env_str(name, default))
}

impl DashConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("BUDGET_DASH_BIND", "0.0.0.0"),
            port: env_u16("BUDGET_DASH_PORT", 80),
            data_dir: env_path("BUDGET_DASH_DATA_DIR", "."),
            budget_suffix: env_str("BUDGET_DASH_BUDGET_SUFFIX", "38.csv"),
            stats_suffix: env_str("BUDGET_DASH_STATS_SUFFIX", "_1_min.csv"),
            frontend_dir: env_path("BUDGET_DASH_FRONTEND_DIR", "frontend"),
            // A zero step would never advance the slider marks.
            tick_days: env_u32("BUDGET_DASH_TICK_DAYS", 15).max(1),
        }
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 80,
            data_dir: PathBuf::from("."),
            budget_suffix: "38.csv".to_string(),
            stats_suffix: "_1_min.csv".to_string(),
            frontend_dir: PathBuf::from("frontend"),
            tick_days: 15,
        }
    }
}
