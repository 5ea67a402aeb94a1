use spider_core::{
    ConsistencyPolicy, Palette, SpiderConfig, SpiderConfigOverrides, FALLBACK_COLOR,
};

#[test]
fn known_groups_resolve_to_table_colors() {
    let palette = Palette::default();
    assert_eq!(palette.color_for("B-3000"), "rgba(0,0,205,0.9)");
}

#[test]
fn unknown_groups_fall_back() {
    let palette = Palette::default();
    assert_eq!(palette.color_for("C-5000"), FALLBACK_COLOR);
    assert_eq!(palette.color_for(""), FALLBACK_COLOR);
}

#[test]
fn overrides_change_only_given_fields() {
    let cfg = SpiderConfig::from(SpiderConfigOverrides {
        palette: Some([("C-5000".to_string(), "#0f0".to_string())].into()),
        response_threshold: Some(-50.0),
        y_range: Some((-60.0, 120.0)),
        ..SpiderConfigOverrides::default()
    });

    assert_eq!(cfg.palette.color_for("C-5000"), "#0f0");
    assert_eq!(cfg.palette.color_for("A-1800"), "rgba(255,182,193,0.8)");
    assert_eq!(cfg.response_threshold, -50.0);
    assert_eq!(cfg.progression_threshold, 20.0);
    assert_eq!(cfg.y_range, (-60.0, 120.0));
    assert_eq!(cfg.consistency, ConsistencyPolicy::Warn);
}

#[test]
fn overrides_from_json_merge_palette() {
    let overrides: SpiderConfigOverrides = serde_json::from_str(
        r##"{"palette": {"A-1800": "#111111"}, "fallback_color": "black", "consistency": "reject"}"##,
    )
    .unwrap();

    let cfg = SpiderConfig::from(overrides);

    assert_eq!(cfg.palette.color_for("A-1800"), "#111111");
    assert_eq!(cfg.palette.color_for("B-3000"), "rgba(0,0,205,0.9)");
    assert_eq!(cfg.palette.color_for("Z-1"), "black");
    assert_eq!(cfg.consistency, ConsistencyPolicy::Reject);
}

#[test]
fn empty_overrides_are_the_defaults() {
    let overrides: SpiderConfigOverrides = serde_json::from_str("{}").unwrap();
    assert_eq!(SpiderConfig::from(overrides), SpiderConfig::default());
}
