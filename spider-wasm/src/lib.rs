//! Framework-neutral WASM <-> JavaScript bridge for the spider transforms.

use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use spider_core::{
    build_series, summarize, to_traces, FilterSelection, MeasurementRecord, PlotTrace,
    PlotlyLayout, SpiderConfig, SpiderConfigOverrides, SpiderError,
};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct JsPlot {
    traces: Vec<PlotTrace>,
    layout: PlotlyLayout,
}

/// Plotly-ready traces and layout for a record array.
#[wasm_bindgen]
pub fn spider_plot(records: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let records = read_records(records)?;
    let cfg = read_config(config)?;

    let series = build_series(&records, &cfg).map_err(format_spider_error)?;
    let plot = JsPlot {
        traces: to_traces(&series),
        layout: PlotlyLayout::from_config(&cfg),
    };

    to_value(&plot).map_err(|err| JsValue::from_str(&format!("could not serialize plot: {err}")))
}

/// Plotted series (points, group key, color, legend flag) for a record array.
#[wasm_bindgen]
pub fn spider_series(records: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let records = read_records(records)?;
    let cfg = read_config(config)?;

    let series = build_series(&records, &cfg).map_err(format_spider_error)?;
    to_value(&series)
        .map_err(|err| JsValue::from_str(&format!("could not serialize series: {err}")))
}

#[wasm_bindgen]
pub fn spider_summary(records: JsValue) -> Result<JsValue, JsValue> {
    let records = read_records(records)?;
    let summary = summarize(&records).map_err(format_spider_error)?;
    to_value(&summary)
        .map_err(|err| JsValue::from_str(&format!("could not serialize summary: {err}")))
}

/// Form-encoded query string for dropdown values; `All` drops the parameter.
#[wasm_bindgen]
pub fn spider_query(arm: &str, dose: &str, tumor: &str) -> Result<String, JsValue> {
    let filters = FilterSelection::new(arm, dose, tumor)
        .to_filters()
        .map_err(format_spider_error)?;
    Ok(filters.query_string())
}

fn read_records(records: JsValue) -> Result<Vec<MeasurementRecord>, JsValue> {
    let value = from_value::<serde_json::Value>(records)
        .map_err(|err| JsValue::from_str(&format!("could not read record array: {err}")))?;
    spider_source::parse_records_value(&value).map_err(format_spider_error)
}

fn read_config(config: Option<JsValue>) -> Result<SpiderConfig, JsValue> {
    let Some(js_cfg) = config else {
        return Ok(SpiderConfig::default());
    };
    if js_cfg.is_undefined() || js_cfg.is_null() {
        return Ok(SpiderConfig::default());
    }

    let cfg: SpiderConfigOverrides = from_value(js_cfg)
        .map_err(|err| JsValue::from_str(&format!("could not read config: {err}")))?;
    Ok(SpiderConfig::from(cfg))
}

fn format_spider_error(err: SpiderError) -> JsValue {
    JsValue::from_str(&format!("Spider error: {err}"))
}
