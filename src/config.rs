use std::ops::RangeInclusive;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// An inclusive `min..=max` range of footprint sizes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SizeRange {
    /// Smallest size, at least 1.
    pub min: usize,
    /// Largest size, at least `min`.
    pub max: usize,
}

impl SizeRange {
    /// Every size in the range.
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.min == 0 {
            return Err(ConfigError::Validation(format!("{name}.min must be >= 1")));
        }
        if self.min > self.max {
            return Err(ConfigError::Validation(format!("{name}.min must be <= {name}.max")));
        }
        Ok(())
    }
}

/// How connector endpoints are chosen.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Reserve disjoint rectangles and take one diagonal connector from each; rejected pairs are dropped.
    #[default]
    Footprint,
    /// Draw endpoints directly, re-rolling the end until it lands on a free cell.
    RetryUntilPlaced,
}

/// Knobs for connector generation, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fraction of the board that footprints may cover, in `(0, 1]`.
    pub coverage_target: f64,
    /// Footprint heights in rows.
    pub heights: SizeRange,
    /// Footprint widths in columns.
    pub widths: SizeRange,
    /// Endpoint selection strategy.
    pub policy: PlacementPolicy,
    /// Connectors attempted per kind under [`PlacementPolicy::RetryUntilPlaced`]; `rows / 2 + 1` when absent.
    pub connectors_per_kind: Option<usize>,
    /// Seed for reproducible boards; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            coverage_target: 0.7,
            heights: SizeRange { min: 3, max: 5 },
            widths: SizeRange { min: 2, max: 5 },
            policy: PlacementPolicy::Footprint,
            connectors_per_kind: None,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GeneratorConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.coverage_target > 0.0 && self.coverage_target <= 1.0) {
            return Err(ConfigError::Validation("coverage_target must be in (0, 1]".into()));
        }
        self.heights.validate("heights")?;
        self.widths.validate("widths")?;
        Ok(())
    }

    /// A random source for this configuration: seeded when [`Self::seed`] is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
