//! asc-oracle: DP tables for every preset, built once in the background.
//!
//! A [`TableHandle`] starts the build and publishes the finished [`TableSet`]
//! exactly once. Sessions share the handle and fail fast until it is ready.

use thiserror::Error;

pub mod handle;
pub mod tables;

pub use handle::TableHandle;
pub use tables::{BuildInfo, PresetTables, TableSet};

use asc_core::{EngineConfig, Preset};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("probability tables are still being built")]
    NotReady,
    #[error("table build thread failed")]
    BuildFailed,
    #[error("no table built for preset {0}")]
    MissingTable(Preset),
}

/// Get the default-config table set (builds on first call).
///
/// Building both presets takes a moment, so this caches the result for the
/// process. Thread-safe via std::sync::OnceLock.
pub fn tables() -> &'static TableSet {
    use std::sync::OnceLock;
    static TABLES: OnceLock<TableSet> = OnceLock::new();
    TABLES.get_or_init(|| TableSet::build(&EngineConfig::default()))
}

#[cfg(test)]
mod golden_tests;
