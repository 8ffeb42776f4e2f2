//! Engine configuration: presets, goal carve-outs and logging.
//!
//! Loaded from YAML (`configs/default.yaml`); every field has a default so an
//! empty document yields the built-in presets.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NUM_ATTEMPTS;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Named goal configuration. The set is closed: one DP table is built per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    TotalSixteen,
    TotalFourteen,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::TotalSixteen, Preset::TotalFourteen];

    pub fn name(self) -> &'static str {
        match self {
            Preset::TotalSixteen => "total_sixteen",
            Preset::TotalFourteen => "total_fourteen",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16" | "total_sixteen" | "totalSixteen" => Ok(Preset::TotalSixteen),
            "14" | "total_fourteen" | "totalFourteen" => Ok(Preset::TotalFourteen),
            other => Err(ConfigError::Invalid(format!("unknown preset {other:?}"))),
        }
    }
}

/// Goals for one preset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresetConfig {
    /// Required combined successes over both positive tracks.
    pub positive_goal_sum: usize,
    #[serde(default)]
    pub first_positive_goal: usize,
    #[serde(default)]
    pub second_positive_goal: usize,
    /// Maximum tolerated successes on the negative track.
    #[serde(default = "default_negative_goal")]
    pub negative_goal: usize,
    /// `[first, second]` success pairs that never count as a goal.
    #[serde(default)]
    pub excluded_cells: Vec<[usize; 2]>,
    /// Cells flipped after the sum rule and carve-outs are applied.
    #[serde(default)]
    pub toggled_cells: Vec<[usize; 2]>,
}

fn default_negative_goal() -> usize {
    4
}

impl PresetConfig {
    pub fn total_sixteen() -> Self {
        Self {
            positive_goal_sum: 16,
            first_positive_goal: 0,
            second_positive_goal: 0,
            negative_goal: default_negative_goal(),
            excluded_cells: vec![[8, 8]],
            toggled_cells: Vec::new(),
        }
    }

    pub fn total_fourteen() -> Self {
        Self {
            positive_goal_sum: 14,
            first_positive_goal: 0,
            second_positive_goal: 0,
            negative_goal: default_negative_goal(),
            excluded_cells: vec![[8, 6], [6, 8]],
            toggled_cells: Vec::new(),
        }
    }

    /// Goal of `track`'s state fold (`negative_goal` for the negative track).
    pub fn goal_for(&self, track: crate::Track) -> usize {
        match track {
            crate::Track::FirstPositive => self.first_positive_goal,
            crate::Track::SecondPositive => self.second_positive_goal,
            crate::Track::Negative => self.negative_goal,
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let n = NUM_ATTEMPTS;
        if self.first_positive_goal > n || self.second_positive_goal > n || self.negative_goal > n {
            return Err(ConfigError::Invalid(format!(
                "{name}: per-track goals must be <= {n}"
            )));
        }
        if self.positive_goal_sum > 2 * n {
            return Err(ConfigError::Invalid(format!(
                "{name}: positive_goal_sum {} exceeds {}",
                self.positive_goal_sum,
                2 * n
            )));
        }
        let cells = [("excluded", &self.excluded_cells), ("toggled", &self.toggled_cells)];
        for (kind, list) in cells {
            if let Some([i, j]) = list.iter().find(|[i, j]| *i > n || *j > n) {
                return Err(ConfigError::Invalid(format!(
                    "{name}: {kind} cell [{i}, {j}] outside 0..={n}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresetTable {
    #[serde(default = "PresetConfig::total_sixteen")]
    pub total_sixteen: PresetConfig,
    #[serde(default = "PresetConfig::total_fourteen")]
    pub total_fourteen: PresetConfig,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self {
            total_sixteen: PresetConfig::total_sixteen(),
            total_fourteen: PresetConfig::total_fourteen(),
        }
    }
}

/// Session event logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Optional NDJSON file receiving one event per session action.
    #[serde(default)]
    pub events_path: Option<String>,
    /// Flush the event file every N lines (0 disables periodic flushing).
    #[serde(default)]
    pub flush_every_lines: u64,
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Preset active when a session starts.
    #[serde(default = "default_preset")]
    pub default_preset: Preset,
    #[serde(default)]
    pub presets: PresetTable,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_preset() -> Preset {
    Preset::TotalFourteen
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
            presets: PresetTable::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for preset in Preset::ALL {
            self.preset(preset).validate(preset.name())?;
        }
        Ok(())
    }

    pub fn preset(&self, preset: Preset) -> &PresetConfig {
        match preset {
            Preset::TotalSixteen => &self.presets.total_sixteen,
            Preset::TotalFourteen => &self.presets.total_fourteen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_yaml() {
        let config = EngineConfig::load("../configs/default.yaml")
            .expect("Failed to load configs/default.yaml");

        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.default_preset, Preset::TotalFourteen);
        assert_eq!(config.presets.total_sixteen.excluded_cells, vec![[8, 8]]);
        assert_eq!(config.presets.total_fourteen.negative_goal, 4);
    }

    #[test]
    fn test_empty_yaml_uses_builtin_presets() {
        let config = EngineConfig::from_yaml("{}").expect("Failed to parse YAML");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_preset_fills_defaults() {
        let yaml = r#"
default_preset: total_sixteen
presets:
  total_fourteen:
    positive_goal_sum: 12
logging:
  events_path: "events.ndjson"
  flush_every_lines: 1
"#;
        let config = EngineConfig::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.default_preset, Preset::TotalSixteen);
        let p = config.preset(Preset::TotalFourteen);
        assert_eq!(p.positive_goal_sum, 12);
        assert_eq!(p.negative_goal, 4);
        assert!(p.excluded_cells.is_empty());
        assert_eq!(config.presets.total_sixteen, PresetConfig::total_sixteen());
        assert_eq!(config.logging.events_path.as_deref(), Some("events.ndjson"));
    }

    #[test]
    fn test_out_of_range_cells_rejected() {
        let yaml = r#"
presets:
  total_sixteen:
    positive_goal_sum: 16
    excluded_cells: [[11, 0]]
"#;
        let err = EngineConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn test_toggled_cells_parse_and_are_bounds_checked() {
        let yaml = r#"
presets:
  total_fourteen:
    positive_goal_sum: 14
    toggled_cells: [[6, 6], [8, 6]]
"#;
        let config = EngineConfig::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.preset(Preset::TotalFourteen).toggled_cells, vec![[6, 6], [8, 6]]);
        assert!(config.presets.total_sixteen.toggled_cells.is_empty());

        let yaml = r#"
presets:
  total_fourteen:
    positive_goal_sum: 14
    toggled_cells: [[0, 12]]
"#;
        let err = EngineConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("toggled cell [0, 12]"), "{err}");
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let invalid_yaml = "this is not: valid: yaml: {{{}}}";
        assert!(EngineConfig::from_yaml(invalid_yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        let mut config = EngineConfig::default();
        config.presets.total_fourteen.excluded_cells.push([7, 7]);
        std::fs::write(&path, config.to_yaml().unwrap()).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!("14".parse::<Preset>().unwrap(), Preset::TotalFourteen);
        assert_eq!("total_sixteen".parse::<Preset>().unwrap(), Preset::TotalSixteen);
        assert!("15".parse::<Preset>().is_err());
    }
}
