use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const FALLBACK_COLOR: &str = "gray";

/// Arm/dose group colors. Lookup is total: unknown keys get the fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub colors: BTreeMap<String, String>,
    pub fallback: String,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            ("A-1800", "rgba(255,182,193,0.8)"),
            ("A-3000", "rgba(255,105,180,0.9)"),
            ("B-1800", "rgba(135,206,250,0.8)"),
            ("B-3000", "rgba(0,0,205,0.9)"),
        ]
        .into_iter()
        .map(|(key, color)| (key.to_string(), color.to_string()))
        .collect();

        Self {
            colors,
            fallback: FALLBACK_COLOR.to_string(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, group_key: &str) -> &str {
        self.colors
            .get(group_key)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    /// Adds or replaces entries, keeping the rest of the table.
    pub fn merge(&mut self, overrides: BTreeMap<String, String>) {
        self.colors.extend(overrides);
    }
}
