use serde_json::json;
use spider_core::{PlotLayout, PlotlyLayout, SpiderConfig};

#[test]
fn plotly_layout_uses_plotly_keys() {
    let layout = serde_json::to_value(PlotlyLayout::from_config(&SpiderConfig::default())).unwrap();

    assert_eq!(layout["title"], "Tumor Size Change Over Time");
    assert_eq!(layout["xaxis"]["title"]["text"], "Weeks on Treatment");
    assert_eq!(layout["xaxis"]["zeroline"], false);
    assert_eq!(layout["yaxis"]["title"]["text"], "% Change from Baseline");
    assert_eq!(layout["yaxis"]["range"], json!([-100.0, 100.0]));
    assert_eq!(layout["yaxis"]["zeroline"], true);
    assert_eq!(layout["yaxis"]["zerolinecolor"], "#999");
    assert_eq!(layout["showlegend"], true);
    assert_eq!(layout["margin"], json!({"t": 60, "r": 20, "l": 60, "b": 60}));
    assert!(layout.get("reference_lines").is_none());
}

#[test]
fn reference_lines_become_paper_shapes() {
    let layout = serde_json::to_value(PlotlyLayout::from_config(&SpiderConfig::default())).unwrap();
    let shapes = layout["shapes"].as_array().unwrap();

    assert_eq!(shapes.len(), 2);
    for (shape, y) in shapes.iter().zip([20.0, -30.0]) {
        assert_eq!(shape["type"], "line");
        assert_eq!(shape["xref"], "paper");
        assert_eq!(shape["x0"], 0.0);
        assert_eq!(shape["x1"], 1.0);
        assert_eq!(shape["y0"], y);
        assert_eq!(shape["y1"], y);
        assert_eq!(shape["line"], json!({"width": 1.5, "color": "#666", "dash": "dash"}));
    }
}

#[test]
fn thresholds_and_range_follow_config() {
    let config = SpiderConfig {
        progression_threshold: 25.0,
        y_range: (-80.0, 150.0),
        ..SpiderConfig::default()
    };

    let plotly = PlotlyLayout::from(&PlotLayout::from_config(&config));

    assert_eq!(plotly.yaxis.range, Some([-80.0, 150.0]));
    assert_eq!(plotly.shapes[0].y0, 25.0);
    assert_eq!(plotly.shapes[1].y0, -30.0);
}
