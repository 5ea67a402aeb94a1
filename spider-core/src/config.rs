use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Palette;

/// What to do when one subject's records disagree on arm or dose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyPolicy {
    Ignore,
    /// Log a warning and keep the first record's values.
    #[default]
    Warn,
    Reject,
}

/// Settings for series building and plot layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpiderConfig {
    pub palette: Palette,
    pub consistency: ConsistencyPolicy,
    /// Percent change above which a subject is considered progressing.
    pub progression_threshold: f64,
    /// Percent change below which a subject is considered responding.
    pub response_threshold: f64,
    pub y_range: (f64, f64),
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            consistency: ConsistencyPolicy::default(),
            progression_threshold: 20.0,
            response_threshold: -30.0,
            y_range: (-100.0, 100.0),
        }
    }
}

/// Partial settings layered over [`SpiderConfig::default`]. Palette entries
/// are merged into the default table rather than replacing it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpiderConfigOverrides {
    pub palette: Option<BTreeMap<String, String>>,
    pub fallback_color: Option<String>,
    pub consistency: Option<ConsistencyPolicy>,
    pub progression_threshold: Option<f64>,
    pub response_threshold: Option<f64>,
    pub y_range: Option<(f64, f64)>,
}

impl SpiderConfigOverrides {
    pub fn apply(self, mut base: SpiderConfig) -> SpiderConfig {
        if let Some(palette) = self.palette {
            base.palette.merge(palette);
        }
        if let Some(fallback) = self.fallback_color {
            base.palette.fallback = fallback;
        }
        if let Some(policy) = self.consistency {
            base.consistency = policy;
        }
        if let Some(threshold) = self.progression_threshold {
            base.progression_threshold = threshold;
        }
        if let Some(threshold) = self.response_threshold {
            base.response_threshold = threshold;
        }
        if let Some(range) = self.y_range {
            base.y_range = range;
        }
        base
    }
}

impl From<SpiderConfigOverrides> for SpiderConfig {
    fn from(overrides: SpiderConfigOverrides) -> Self {
        overrides.apply(SpiderConfig::default())
    }
}
