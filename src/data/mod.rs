pub mod loader;
pub mod records;
pub mod store;

pub use loader::{load_data_store, LoadOptions};
pub use records::{BudgetRecord, StatRecord, Trend};
pub use store::{DataStore, Pairing};
