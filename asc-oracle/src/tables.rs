//! Per-preset tables and the set built at startup.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use asc_core::{EngineConfig, GoalCells, Preset, PresetConfig};
use asc_dp::{Dims, DpTable, Params};
use asc_logging::{debug_log, hash_config_bytes, now_ms, TableBuildEventV1};

use crate::EngineError;

/// Timing and size of one preset's build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInfo {
    pub preset: Preset,
    /// Cells written by the build pass.
    pub cells: usize,
    pub build_secs: f64,
}

/// Everything a session needs to answer queries for one preset.
#[derive(Debug, Clone)]
pub struct PresetTables {
    pub preset: Preset,
    pub config: PresetConfig,
    pub goals: GoalCells,
    pub table: Arc<DpTable>,
    pub info: BuildInfo,
}

impl PresetTables {
    pub fn build(preset: Preset, config: PresetConfig, dims: Dims) -> Self {
        let start = Instant::now();
        let goals = GoalCells::for_preset(dims.n, &config);
        let table = DpTable::build(dims, &goals);
        let info = BuildInfo {
            preset,
            cells: dims.visited_cells(),
            build_secs: start.elapsed().as_secs_f64(),
        };
        debug_log(&TableBuildEventV1 {
            event: "table_build",
            ts_ms: now_ms(),
            preset: preset.name().to_string(),
            cells: info.cells as u64,
            build_secs: info.build_secs,
        });
        Self {
            preset,
            config,
            goals,
            table: Arc::new(table),
            info,
        }
    }

    pub fn dims(&self) -> Dims {
        self.table.dims()
    }

    /// Fresh-stone coordinates for this preset.
    pub fn start(&self) -> Params {
        let dims = self.dims();
        Params::start(dims, self.config.negative_goal.min(dims.n))
    }

    /// Optimal success probability from a fresh stone.
    pub fn start_value(&self) -> f64 {
        self.table.get(self.start())
    }
}

/// Tables for every preset, built together and immutable afterwards.
#[derive(Debug)]
pub struct TableSet {
    tables: FxHashMap<Preset, PresetTables>,
    config_hash: Option<String>,
}

impl TableSet {
    pub fn build(config: &EngineConfig) -> Self {
        Self::build_with_dims(config, Dims::STANDARD)
    }

    /// Build all presets in parallel; each table still fills in its own fixed order.
    pub fn build_with_dims(config: &EngineConfig, dims: Dims) -> Self {
        let tables: FxHashMap<Preset, PresetTables> = Preset::ALL
            .par_iter()
            .map(|&preset| (preset, PresetTables::build(preset, config.preset(preset).clone(), dims)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();
        let config_hash = config.to_yaml().ok().map(|y| hash_config_bytes(y.as_bytes()));
        Self { tables, config_hash }
    }

    pub fn get(&self, preset: Preset) -> Result<&PresetTables, EngineError> {
        self.tables.get(&preset).ok_or(EngineError::MissingTable(preset))
    }

    /// Build info in `Preset::ALL` order.
    pub fn build_info(&self) -> Vec<&BuildInfo> {
        Preset::ALL
            .iter()
            .filter_map(|p| self.tables.get(p))
            .map(|t| &t.info)
            .collect()
    }

    pub fn config_hash(&self) -> Option<&str> {
        self.config_hash.as_deref()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
