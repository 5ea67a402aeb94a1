//! Filter model shared by the views, the CLI and the record source.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{MeasurementRecord, Scalar, SpiderError};

/// Dropdown value meaning "no constraint on this dimension".
pub const ALL_SENTINEL: &str = "All";

/// Raw dropdown values as the user picked them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSelection {
    pub arm: String,
    pub dose: String,
    pub tumor: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            arm: ALL_SENTINEL.to_string(),
            dose: ALL_SENTINEL.to_string(),
            tumor: ALL_SENTINEL.to_string(),
        }
    }
}

impl FilterSelection {
    pub fn new(arm: &str, dose: &str, tumor: &str) -> Self {
        Self {
            arm: arm.to_string(),
            dose: dose.to_string(),
            tumor: tumor.to_string(),
        }
    }

    /// Drops the `All` sentinel, trims list entries and validates dose
    /// values. A dose list with no entries left is rejected.
    pub fn to_filters(&self) -> Result<SpiderFilters, SpiderError> {
        let dose = match selected(&self.dose) {
            None => None,
            Some(raw) => {
                let parts: Vec<&str> = split_values(&raw).collect();
                if parts.is_empty() {
                    return Err(SpiderError::NotNumeric {
                        field: "dose",
                        value: raw,
                    });
                }
                for part in &parts {
                    Scalar::from(*part).to_number("dose")?;
                }
                Some(parts.join(","))
            }
        };

        Ok(SpiderFilters {
            arm: selected(&self.arm).and_then(|raw| normalized(&raw)),
            dose,
            tumor_type: selected(&self.tumor).and_then(|raw| normalized(&raw)),
        })
    }
}

fn selected(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == ALL_SENTINEL {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalized(value: &str) -> Option<String> {
    let parts: Vec<&str> = split_values(value).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(","))
    }
}

fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|part| !part.is_empty())
}

/// Active filters. `None` means no constraint; each value may hold several
/// comma-separated alternatives.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SpiderFilters {
    pub arm: Option<String>,
    pub dose: Option<String>,
    pub tumor_type: Option<String>,
}

impl SpiderFilters {
    pub fn is_unfiltered(&self) -> bool {
        self.arm.is_none() && self.dose.is_none() && self.tumor_type.is_none()
    }

    /// Query parameters in wire order: `arms`, `doses`, `tumor_types`.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("arms", self.arm.as_deref()),
            ("doses", self.dose.as_deref()),
            ("tumor_types", self.tumor_type.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
    }

    /// Form-encoded `arms=A&doses=1800`, or an empty string when nothing is
    /// filtered.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// Applies the same membership semantics as the record endpoint.
    pub fn matches(&self, record: &MeasurementRecord) -> bool {
        if let Some(arms) = &self.arm {
            if !split_values(arms).any(|arm| arm == record.arm) {
                return false;
            }
        }

        if let Some(doses) = &self.dose {
            let Ok(dose) = record.dose_value() else {
                return false;
            };
            let hit = split_values(doses)
                .filter_map(|value| Scalar::from(value).to_number("dose").ok())
                .any(|wanted| wanted == dose);
            if !hit {
                return false;
            }
        }

        if let Some(types) = &self.tumor_type {
            let Some(tumor_type) = record.tumor_type.as_deref() else {
                return false;
            };
            if !split_values(types).any(|wanted| wanted == tumor_type) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, records: Vec<MeasurementRecord>) -> Vec<MeasurementRecord> {
        if self.is_unfiltered() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}
