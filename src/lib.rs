//! Dive logbook library
//!
//! This library records dives, keeps them in durable key/value storage with
//! all measurements in metric units, and derives searches, sort orders and
//! statistics from the stored collection.

mod cli;
mod config;
mod dive;
mod dive_store;
mod errors;
mod helper;
mod logbook;
mod query;
mod settings;
mod stats;
mod storage;
mod types;
mod units;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use dive::*;
pub use dive_store::*;
pub use errors::*;
pub use helper::*;
pub use logbook::*;
pub use query::*;
pub use settings::*;
pub use stats::*;
pub use storage::*;
pub use types::*;
pub use units::*;
