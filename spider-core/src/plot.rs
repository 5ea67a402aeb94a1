//! Plotly-shaped traces and layout for the spider plot.
//!
//! [`PlotLayout`] is the view model the SVG chart draws from; [`PlotlyLayout`]
//! is the same layout in the Plotly `layout` schema.

use serde::{Deserialize, Serialize};

use crate::{PlottedSeries, SpiderConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerStyle {
    pub size: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub name: String,
    pub line: LineStyle,
    pub marker: MarkerStyle,
    #[serde(rename = "legendgroup")]
    pub legend_group: String,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
}

impl From<&PlottedSeries> for PlotTrace {
    fn from(series: &PlottedSeries) -> Self {
        Self {
            x: series.weeks(),
            y: series.changes(),
            kind: "scatter".to_string(),
            mode: "lines+markers".to_string(),
            name: series.display_name.clone(),
            line: LineStyle {
                width: 2.0,
                color: series.color.clone(),
                dash: None,
            },
            marker: MarkerStyle {
                size: 6.0,
                color: series.color.clone(),
            },
            legend_group: series.group_key.clone(),
            show_legend: series.show_legend,
        }
    }
}

pub fn to_traces(series: &[PlottedSeries]) -> Vec<PlotTrace> {
    series.iter().map(PlotTrace::from).collect()
}

/// Horizontal dashed line across the whole plot width.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub y: f64,
    pub line: LineStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotLayout {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub y_range: (f64, f64),
    pub reference_lines: Vec<ReferenceLine>,
}

impl PlotLayout {
    pub fn from_config(config: &SpiderConfig) -> Self {
        let dashed = || LineStyle {
            width: 1.5,
            color: "#666".to_string(),
            dash: Some("dash".to_string()),
        };

        Self {
            title: "Tumor Size Change Over Time".to_string(),
            x_title: "Weeks on Treatment".to_string(),
            y_title: "% Change from Baseline".to_string(),
            y_range: config.y_range,
            reference_lines: vec![
                ReferenceLine {
                    label: "Progression".to_string(),
                    y: config.progression_threshold,
                    line: dashed(),
                },
                ReferenceLine {
                    label: "Response".to_string(),
                    y: config.response_threshold,
                    line: dashed(),
                },
            ],
        }
    }
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self::from_config(&SpiderConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub standoff: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotlyAxis {
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    pub zeroline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zerolinecolor: Option<String>,
}

/// A `layout.shapes` entry spanning the full plot width (`xref: "paper"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotlyShape {
    #[serde(rename = "type")]
    pub kind: String,
    pub xref: String,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub line: LineStyle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlotlyMargin {
    pub t: u32,
    pub r: u32,
    pub l: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotlyLayout {
    pub title: String,
    pub xaxis: PlotlyAxis,
    pub yaxis: PlotlyAxis,
    pub showlegend: bool,
    pub margin: PlotlyMargin,
    pub shapes: Vec<PlotlyShape>,
}

impl From<&PlotLayout> for PlotlyLayout {
    fn from(layout: &PlotLayout) -> Self {
        Self {
            title: layout.title.clone(),
            xaxis: PlotlyAxis {
                title: AxisTitle {
                    text: layout.x_title.clone(),
                    standoff: 15,
                },
                range: None,
                zeroline: false,
                zerolinecolor: None,
            },
            yaxis: PlotlyAxis {
                title: AxisTitle {
                    text: layout.y_title.clone(),
                    standoff: 15,
                },
                range: Some([layout.y_range.0, layout.y_range.1]),
                zeroline: true,
                zerolinecolor: Some("#999".to_string()),
            },
            showlegend: true,
            margin: PlotlyMargin {
                t: 60,
                r: 20,
                l: 60,
                b: 60,
            },
            shapes: layout
                .reference_lines
                .iter()
                .map(|reference| PlotlyShape {
                    kind: "line".to_string(),
                    xref: "paper".to_string(),
                    x0: 0.0,
                    x1: 1.0,
                    y0: reference.y,
                    y1: reference.y,
                    line: reference.line.clone(),
                })
                .collect(),
        }
    }
}

impl PlotlyLayout {
    pub fn from_config(config: &SpiderConfig) -> Self {
        Self::from(&PlotLayout::from_config(config))
    }
}
