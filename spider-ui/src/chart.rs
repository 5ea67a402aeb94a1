//! SVG geometry for the spider plot. Kept free of DOM types so it can be
//! tested on the host.

use spider_core::PlottedSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            margin_left: 60.0,
            margin_right: 20.0,
            margin_top: 60.0,
            margin_bottom: 60.0,
        }
    }
}

/// Maps weeks and percent change into SVG coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    frame: ChartFrame,
    x_max: f64,
    x_step: f64,
    y_min: f64,
    y_max: f64,
}

const TARGET_TICKS: f64 = 8.0;

impl ChartScale {
    pub fn new(frame: ChartFrame, series: &[PlottedSeries], y_range: (f64, f64)) -> Self {
        let observed = series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|point| point.week)
            .fold(1.0_f64, f64::max);
        let x_step = nice_step(observed, TARGET_TICKS);
        let x_max = (observed / x_step).ceil() * x_step;

        let (y_min, y_max) = if y_range.0 < y_range.1 {
            y_range
        } else {
            (-100.0, 100.0)
        };

        Self {
            frame,
            x_max,
            x_step,
            y_min,
            y_max,
        }
    }

    pub fn frame(&self) -> ChartFrame {
        self.frame
    }

    pub fn left(&self) -> f64 {
        self.frame.margin_left
    }

    pub fn right(&self) -> f64 {
        self.frame.width - self.frame.margin_right
    }

    pub fn top(&self) -> f64 {
        self.frame.margin_top
    }

    pub fn bottom(&self) -> f64 {
        self.frame.height - self.frame.margin_bottom
    }

    pub fn x(&self, week: f64) -> f64 {
        self.left() + (week / self.x_max) * (self.right() - self.left())
    }

    /// Values outside the configured range are pinned to the plot edge.
    pub fn y(&self, percent_change: f64) -> f64 {
        let clamped = percent_change.clamp(self.y_min, self.y_max);
        let ratio = (clamped - self.y_min) / (self.y_max - self.y_min);
        self.bottom() - ratio * (self.bottom() - self.top())
    }

    pub fn x_ticks(&self) -> Vec<f64> {
        ticks(0.0, self.x_max, self.x_step)
    }

    pub fn y_ticks(&self) -> Vec<f64> {
        let step = nice_step(self.y_max - self.y_min, TARGET_TICKS);
        ticks(self.y_min, self.y_max, step)
    }

    /// SVG path data for one series.
    pub fn path(&self, series: &PlottedSeries) -> String {
        series
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let command = if index == 0 { 'M' } else { 'L' };
                format!(
                    "{command}{:.1},{:.1}",
                    self.x(point.week),
                    self.y(point.percent_change)
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Step of 1, 2 or 5 times a power of ten giving roughly `target` ticks.
pub fn nice_step(span: f64, target: f64) -> f64 {
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }
    let raw = span / target.max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut values = Vec::new();
    let mut value = (min / step).ceil() * step;
    while value <= max + step * 1e-9 {
        // Avoid "-0" labels.
        values.push(if value.abs() < step * 1e-9 { 0.0 } else { value });
        value += step;
    }
    values
}

pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// One entry per legend group, in series order.
pub fn legend_entries(series: &[PlottedSeries]) -> Vec<LegendEntry> {
    series
        .iter()
        .filter(|s| s.show_legend)
        .map(|s| LegendEntry {
            label: s.display_name.clone(),
            color: s.color.clone(),
        })
        .collect()
}
