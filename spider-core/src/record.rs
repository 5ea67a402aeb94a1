//! Measurement records as received from the record source.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SpiderError;

/// A value that may arrive either as a JSON number or as a string.
///
/// The raw form is kept as received; numeric interpretation always goes
/// through [`Scalar::to_number`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Strict numeric coercion shared by every transform.
    ///
    /// Numbers must be finite. Text is trimmed and must parse as a finite
    /// `f64`; empty text is rejected.
    pub fn to_number(&self, field: &'static str) -> Result<f64, SpiderError> {
        let parsed = match self {
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(text) => text.trim().parse::<f64>().ok(),
        };

        match parsed {
            Some(number) if number.is_finite() => Ok(number),
            _ => Err(SpiderError::NotNumeric {
                field,
                value: self.to_string(),
            }),
        }
    }

    /// Key used for distinctness and group keys (`1800` and `"1800"` collide).
    pub fn key(&self) -> String {
        match self {
            Scalar::Text(text) => text.trim().to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => f.write_str(&format_numeric(*value)),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// One tumor measurement for one subject at one study day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasurementRecord {
    pub subject_id: Scalar,
    pub arm: String,
    pub dose: Scalar,
    pub days: Scalar,
    pub change: Scalar,
    #[serde(default)]
    pub tumor_type: Option<String>,
}

impl MeasurementRecord {
    pub fn new(
        subject_id: impl Into<Scalar>,
        arm: &str,
        dose: impl Into<Scalar>,
        days: impl Into<Scalar>,
        change: impl Into<Scalar>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            arm: arm.to_string(),
            dose: dose.into(),
            days: days.into(),
            change: change.into(),
            tumor_type: None,
        }
    }

    pub fn with_tumor_type(mut self, tumor_type: &str) -> Self {
        self.tumor_type = Some(tumor_type.to_string());
        self
    }

    pub fn subject_key(&self) -> String {
        self.subject_id.key()
    }

    /// `"{arm}-{dose}"`, used for colors and legend grouping.
    pub fn group_key(&self) -> String {
        format!("{}-{}", self.arm, self.dose.key())
    }

    pub fn days_value(&self) -> Result<f64, SpiderError> {
        self.days.to_number("days")
    }

    pub fn change_value(&self) -> Result<f64, SpiderError> {
        self.change.to_number("change")
    }

    pub fn dose_value(&self) -> Result<f64, SpiderError> {
        self.dose.to_number("dose")
    }
}

pub(crate) fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
