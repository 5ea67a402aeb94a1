use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{MeasurementRecord, Scalar, SpiderError};

/// Study overview shown on the summary cards.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Summary {
    pub patient_count: usize,
    /// Distinct arms, lexicographically sorted.
    pub arms: Vec<String>,
    /// Distinct doses, numerically ascending.
    pub doses: Vec<Scalar>,
}

impl Summary {
    pub fn arms_label(&self) -> String {
        self.arms.join(", ")
    }

    pub fn doses_label(&self) -> String {
        self.doses
            .iter()
            .map(Scalar::key)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.patient_count == 0
    }
}

/// Distinct patient/arm/dose counts over the whole record set.
pub fn summarize(records: &[MeasurementRecord]) -> Result<Summary, SpiderError> {
    let patients: HashSet<String> = records.iter().map(MeasurementRecord::subject_key).collect();

    let mut arms: Vec<String> = records.iter().map(|record| record.arm.clone()).collect();
    arms.sort();
    arms.dedup();

    let mut seen_doses = HashSet::new();
    let mut doses = Vec::new();
    for record in records {
        if seen_doses.insert(record.dose.key()) {
            doses.push((record.dose_value()?, record.dose.clone()));
        }
    }
    // Stable: ties keep encounter order.
    doses.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(Summary {
        patient_count: patients.len(),
        arms,
        doses: doses.into_iter().map(|(_, dose)| dose).collect(),
    })
}
