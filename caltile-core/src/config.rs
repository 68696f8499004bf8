//! caltile configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::binning::EventBinner;
use crate::color::{ColorChain, DEFAULT_COLOR};
use crate::error::{CalTileError, CalTileResult};
use crate::event::AllDayPolicy;
use crate::grid::{GridBuilder, RowPolicy};
use crate::layout::{LaneConfig, OverlapLayouter};

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Configuration at ~/.config/caltile/config.toml
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaltileConfig {
    #[serde(default)]
    pub row_policy: RowPolicy,

    #[serde(default)]
    pub all_day_policy: AllDayPolicy,

    #[serde(default = "default_color")]
    pub default_color: String,

    #[serde(default)]
    pub lanes: LaneConfig,
}

impl Default for CaltileConfig {
    fn default() -> Self {
        CaltileConfig {
            row_policy: RowPolicy::default(),
            all_day_policy: AllDayPolicy::default(),
            default_color: default_color(),
            lanes: LaneConfig::default(),
        }
    }
}

impl CaltileConfig {
    pub fn config_path() -> CalTileResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalTileError::Config("Could not determine config directory".into()))?
            .join("caltile");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> CalTileResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalTileResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CalTileError::Config(format!("Could not read {}: {e}", path.display())))?;
        let config: CaltileConfig = toml::from_str(&content)
            .map_err(|e| CalTileError::Config(format!("Invalid config {}: {e}", path.display())))?;
        config.validate()?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn validate(&self) -> CalTileResult<()> {
        let lanes = &self.lanes;
        let fractions = [
            ("cascade_step", lanes.cascade_step),
            ("packed_span", lanes.packed_span),
            ("packed_gutter", lanes.packed_gutter),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(CalTileError::Config(format!(
                    "lanes.{name} must be between 0 and 1, got {value}"
                )));
            }
        }
        if lanes.cascade_step * lanes.cascade_max_lanes.saturating_sub(1) as f64 >= 1.0 {
            return Err(CalTileError::Config(
                "lanes.cascade_step is too large for lanes.cascade_max_lanes".into(),
            ));
        }
        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalTileResult<()> {
        let contents = format!(
            "\
# caltile configuration

# Month grid rows: \"fixed-six\" or \"natural\"
# row_policy = \"fixed-six\"

# All-day detection: \"missing-or-equal-end\" or \"equal-end-only\"
# all_day_policy = \"missing-or-equal-end\"

# Color for events without a project or user color:
# default_color = \"{}\"

# [lanes]
# cascade_max_lanes = 4
# cascade_step = 0.2
# packed_span = 0.9
# packed_gutter = 0.1
",
            DEFAULT_COLOR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalTileError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalTileError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn grid_builder(&self) -> GridBuilder {
        GridBuilder::new(self.row_policy)
    }

    pub fn binner(&self) -> EventBinner {
        EventBinner::new(self.all_day_policy)
    }

    pub fn layouter(&self) -> OverlapLayouter {
        OverlapLayouter::new(self.lanes)
    }

    pub fn color_chain(&self) -> ColorChain {
        ColorChain::new(self.default_color.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CaltileConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, CaltileConfig::default());
    }

    #[test]
    fn test_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caltile").join("config.toml");
        CaltileConfig::create_default_config(&path).unwrap();

        let config = CaltileConfig::load_from(&path).unwrap();
        assert_eq!(config, CaltileConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "row_policy = \"natural\"\nall_day_policy = \"equal-end-only\"\n\n[lanes]\ncascade_max_lanes = 3\n",
        )
        .unwrap();

        let config = CaltileConfig::load_from(&path).unwrap();
        assert_eq!(config.row_policy, RowPolicy::Natural);
        assert_eq!(config.all_day_policy, AllDayPolicy::EqualEndOnly);
        assert_eq!(config.lanes.cascade_max_lanes, 3);
        assert_eq!(config.lanes.cascade_step, 0.2);
        assert_eq!(config.default_color, DEFAULT_COLOR);
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "row_policy = \"sometimes\"\n").unwrap();
        assert!(matches!(
            CaltileConfig::load_from(&path),
            Err(CalTileError::Config(_))
        ));

        std::fs::write(&path, "[lanes]\ncascade_step = 0.5\n").unwrap();
        assert!(matches!(
            CaltileConfig::load_from(&path),
            Err(CalTileError::Config(_))
        ));
    }
}
