//! Per-subject spider plot series.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{ConsistencyPolicy, MeasurementRecord, SpiderConfig, SpiderError};

pub const DAYS_PER_WEEK: f64 = 7.0;

/// One plotted point: weeks on treatment vs. percent change from baseline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub week: f64,
    pub percent_change: f64,
}

impl SeriesPoint {
    pub const BASELINE: SeriesPoint = SeriesPoint {
        week: 0.0,
        percent_change: 0.0,
    };

    pub fn new(week: f64, percent_change: f64) -> Self {
        Self {
            week,
            percent_change,
        }
    }
}

/// A single subject's line on the spider plot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlottedSeries {
    pub subject_id: String,
    pub arm: String,
    pub dose: String,
    pub group_key: String,
    pub display_name: String,
    pub color: String,
    pub show_legend: bool,
    /// Always starts with the baseline point.
    pub points: Vec<SeriesPoint>,
}

impl PlottedSeries {
    pub fn weeks(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.week).collect()
    }

    pub fn changes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.percent_change).collect()
    }

    /// Last observed percent change (baseline excluded).
    pub fn latest_change(&self) -> Option<f64> {
        self.points
            .iter()
            .skip(1)
            .last()
            .map(|point| point.percent_change)
    }
}

/// Builds one series per subject, in first-seen subject order.
pub fn build_series(
    records: &[MeasurementRecord],
    config: &SpiderConfig,
) -> Result<Vec<PlottedSeries>, SpiderError> {
    let mut seen_groups = HashSet::new();
    let mut series = Vec::new();

    for (subject_id, group) in group_by_subject(records) {
        let mut timeline = Vec::with_capacity(group.len());
        for record in group {
            timeline.push((record.days_value()?, record.change_value()?, record));
        }
        // Stable: equal days keep their input order.
        timeline.sort_by(|a, b| a.0.total_cmp(&b.0));

        let Some(&(_, _, first)) = timeline.first() else {
            continue;
        };
        check_consistency(&subject_id, first, &timeline, config.consistency)?;

        let arm = first.arm.clone();
        let dose = first.dose.key();
        let group_key = first.group_key();
        let show_legend = seen_groups.insert(group_key.clone());

        let mut points = Vec::with_capacity(timeline.len() + 1);
        points.push(SeriesPoint::BASELINE);
        points.extend(
            timeline
                .iter()
                .map(|(days, change, _)| SeriesPoint::new(days / DAYS_PER_WEEK, *change)),
        );

        series.push(PlottedSeries {
            display_name: format!("{arm} {dose} mg"),
            color: config.palette.color_for(&group_key).to_string(),
            subject_id,
            arm,
            dose,
            group_key,
            show_legend,
            points,
        });
    }

    tracing::debug!(
        records = records.len(),
        series = series.len(),
        groups = seen_groups.len(),
        "built spider series"
    );

    Ok(series)
}

/// Partitions records by subject, preserving first-seen subject order.
pub fn group_by_subject(records: &[MeasurementRecord]) -> Vec<(String, Vec<&MeasurementRecord>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&MeasurementRecord>)> = Vec::new();

    for record in records {
        match index.entry(record.subject_key()) {
            Entry::Occupied(slot) => groups[*slot.get()].1.push(record),
            Entry::Vacant(slot) => {
                groups.push((slot.key().clone(), vec![record]));
                slot.insert(groups.len() - 1);
            }
        }
    }

    groups
}

fn check_consistency(
    subject_id: &str,
    first: &MeasurementRecord,
    timeline: &[(f64, f64, &MeasurementRecord)],
    policy: ConsistencyPolicy,
) -> Result<(), SpiderError> {
    if policy == ConsistencyPolicy::Ignore {
        return Ok(());
    }

    for (_, _, record) in timeline.iter().skip(1) {
        let divergence = if record.arm != first.arm {
            Some(("arm", first.arm.clone(), record.arm.clone()))
        } else if record.dose.key() != first.dose.key() {
            Some(("dose", first.dose.key(), record.dose.key()))
        } else {
            None
        };

        let Some((field, expected, found)) = divergence else {
            continue;
        };

        if policy == ConsistencyPolicy::Reject {
            return Err(SpiderError::InconsistentSubject {
                subject_id: subject_id.to_string(),
                field,
                expected,
                found,
            });
        }

        tracing::warn!(
            subject_id,
            field,
            expected = %expected,
            found = %found,
            "subject has inconsistent records, keeping earliest values"
        );
        // One warning per subject is enough.
        break;
    }

    Ok(())
}
