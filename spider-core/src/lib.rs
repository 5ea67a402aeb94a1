//! Core data shaping for the tumor-response dashboard: per-subject spider
//! series, study summary, filters and view state.

mod config;
mod filters;
mod palette;
mod plot;
mod record;
mod request;
mod series;
mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use config::{ConsistencyPolicy, SpiderConfig, SpiderConfigOverrides};
pub use filters::{FilterSelection, SpiderFilters, ALL_SENTINEL};
pub use palette::{Palette, FALLBACK_COLOR};
pub use plot::{
    to_traces, AxisTitle, LineStyle, MarkerStyle, PlotLayout, PlotTrace, PlotlyAxis, PlotlyLayout,
    PlotlyMargin, PlotlyShape, ReferenceLine,
};
pub use record::{MeasurementRecord, Scalar};
pub use request::{FailurePresentation, LoadState, RequestToken, RequestTracker};
pub use series::{build_series, group_by_subject, PlottedSeries, SeriesPoint, DAYS_PER_WEEK};
pub use summary::{summarize, Summary};

/// Coarse error classification used by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    DataFormat,
    /// Failed before any request: bad endpoint configuration or an
    /// unreadable local file.
    Local,
}

/// Errors raised while shaping records.
#[derive(Debug, thiserror::Error)]
pub enum SpiderError {
    #[error("field `{field}` is not numeric: {value:?}")]
    NotNumeric { field: &'static str, value: String },
    #[error("subject {subject_id} has inconsistent {field}: {expected} vs {found}")]
    InconsistentSubject {
        subject_id: String,
        field: &'static str,
        expected: String,
        found: String,
    },
    #[error("malformed record payload: {0}")]
    Payload(String),
}

impl SpiderError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::DataFormat
    }
}

/// Summary and series computed from one record set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub series: Vec<PlottedSeries>,
}

impl Snapshot {
    pub fn build(records: &[MeasurementRecord], config: &SpiderConfig) -> Result<Self, SpiderError> {
        Ok(Self {
            generated_at: Utc::now(),
            summary: summarize(records)?,
            series: build_series(records, config)?,
        })
    }

    pub fn traces(&self) -> Vec<PlotTrace> {
        to_traces(&self.series)
    }
}
