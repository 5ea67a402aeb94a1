use spider_core::{
    build_series, group_by_subject, to_traces, ConsistencyPolicy, MeasurementRecord, SeriesPoint,
    SpiderConfig, SpiderError, FALLBACK_COLOR,
};

fn points(raw: &[(f64, f64)]) -> Vec<SeriesPoint> {
    raw.iter()
        .map(|&(week, change)| SeriesPoint::new(week, change))
        .collect()
}

#[test]
fn empty_input_yields_no_series() {
    let series = build_series(&[], &SpiderConfig::default()).unwrap();
    assert!(series.is_empty());
}

#[test]
fn single_subject_is_sorted_converted_and_anchored() {
    let records = vec![
        MeasurementRecord::new("101", "A", 1800, 14, -10),
        MeasurementRecord::new("101", "A", 1800, 7, -40),
    ];

    let series = build_series(&records, &SpiderConfig::default()).unwrap();

    assert_eq!(series.len(), 1);
    let only = &series[0];
    assert_eq!(only.points, points(&[(0.0, 0.0), (1.0, -40.0), (2.0, -10.0)]));
    assert_eq!(only.group_key, "A-1800");
    assert_eq!(only.display_name, "A 1800 mg");
    assert_eq!(only.color, "rgba(255,182,193,0.8)");
    assert!(only.show_legend);
}

#[test]
fn string_encoded_numbers_are_coerced() {
    let records = vec![MeasurementRecord::new("7", "B", "3000", "21", "-30.5")];

    let series = build_series(&records, &SpiderConfig::default()).unwrap();

    assert_eq!(series[0].points, points(&[(0.0, 0.0), (3.0, -30.5)]));
    assert_eq!(series[0].group_key, "B-3000");
}

#[test]
fn legend_is_shown_once_per_group_for_first_subject() {
    let records = vec![
        MeasurementRecord::new(2, "A", 1800, 7, -5),
        MeasurementRecord::new(1, "A", 1800, 7, -15),
        MeasurementRecord::new(3, "B", 3000, 7, 12),
        MeasurementRecord::new(2, "A", 1800, 14, -20),
    ];

    let series = build_series(&records, &SpiderConfig::default()).unwrap();

    let summary: Vec<(&str, bool)> = series
        .iter()
        .map(|s| (s.subject_id.as_str(), s.show_legend))
        .collect();
    assert_eq!(summary, vec![("2", true), ("1", false), ("3", true)]);
}

#[test]
fn unknown_group_uses_fallback_color() {
    let records = vec![MeasurementRecord::new(9, "C", 5000, 7, 0)];

    let series = build_series(&records, &SpiderConfig::default()).unwrap();

    assert_eq!(series[0].group_key, "C-5000");
    assert_eq!(series[0].color, FALLBACK_COLOR);
}

#[test]
fn non_numeric_days_fail_the_whole_build() {
    let records = vec![
        MeasurementRecord::new(1, "A", 1800, 7, -5),
        MeasurementRecord::new(2, "A", 1800, "week two", -5),
    ];

    let err = build_series(&records, &SpiderConfig::default()).unwrap_err();

    assert!(matches!(err, SpiderError::NotNumeric { field: "days", .. }));
}

#[test]
fn group_metadata_comes_from_earliest_record() {
    let records = vec![
        MeasurementRecord::new(1, "B", 3000, 28, 5),
        MeasurementRecord::new(1, "A", 1800, 7, -5),
    ];

    let series = build_series(&records, &SpiderConfig::default()).unwrap();

    assert_eq!(series[0].group_key, "A-1800");
}

#[test]
fn reject_policy_fails_on_divergent_dose() {
    let records = vec![
        MeasurementRecord::new(1, "A", 1800, 7, -5),
        MeasurementRecord::new(1, "A", 3000, 14, -8),
    ];
    let config = SpiderConfig {
        consistency: ConsistencyPolicy::Reject,
        ..SpiderConfig::default()
    };

    let err = build_series(&records, &config).unwrap_err();

    match err {
        SpiderError::InconsistentSubject {
            subject_id,
            field,
            expected,
            found,
        } => {
            assert_eq!(subject_id, "1");
            assert_eq!(field, "dose");
            assert_eq!(expected, "1800");
            assert_eq!(found, "3000");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn custom_palette_overrides_colors() {
    let mut config = SpiderConfig::default();
    config
        .palette
        .merge([("C-5000".to_string(), "#123456".to_string())].into());

    let series = build_series(&[MeasurementRecord::new(1, "C", 5000, 7, 0)], &config).unwrap();

    assert_eq!(series[0].color, "#123456");
}

#[test]
fn traces_carry_plot_styling() {
    let records = vec![
        MeasurementRecord::new(1, "B", 1800, 14, 25),
        MeasurementRecord::new(2, "B", 1800, 14, -35),
    ];
    let series = build_series(&records, &SpiderConfig::default()).unwrap();

    let traces = to_traces(&series);
    let value = serde_json::to_value(&traces[1]).unwrap();

    assert_eq!(value["type"], "scatter");
    assert_eq!(value["mode"], "lines+markers");
    assert_eq!(value["legendgroup"], "B-1800");
    assert_eq!(value["showlegend"], false);
    assert_eq!(value["line"]["color"], "rgba(135,206,250,0.8)");
    assert_eq!(traces[1].x, vec![0.0, 2.0]);
    assert_eq!(traces[1].y, vec![0.0, -35.0]);
}

#[test]
fn warn_policy_keeps_earliest_values() {
    let records = vec![
        MeasurementRecord::new(1, "A", 1800, 7, -5),
        MeasurementRecord::new(1, "A", 3000, 14, -8),
    ];
    let config = SpiderConfig {
        consistency: ConsistencyPolicy::Warn,
        ..SpiderConfig::default()
    };

    let series = build_series(&records, &config).unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].dose, "1800");
    assert_eq!(series[0].group_key, "A-1800");
    assert_eq!(series[0].points.len(), 3);
}

#[test]
fn ignore_policy_accepts_divergent_arm() {
    let records = vec![
        MeasurementRecord::new(1, "B", 3000, 14, 4),
        MeasurementRecord::new(1, "A", 3000, 7, -2),
    ];
    let config = SpiderConfig {
        consistency: ConsistencyPolicy::Ignore,
        ..SpiderConfig::default()
    };

    let series = build_series(&records, &config).unwrap();

    assert_eq!(series[0].arm, "A");
    assert_eq!(series[0].color, "rgba(255,105,180,0.9)");
}

#[test]
fn grouping_preserves_first_seen_order() {
    let records = vec![
        MeasurementRecord::new("s2", "A", 1800, 7, -5),
        MeasurementRecord::new("s1", "B", 3000, 7, 3),
        MeasurementRecord::new("s2", "A", 1800, 14, -8),
    ];
    let groups = group_by_subject(&records);
    let ids: Vec<&str> = groups.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s1"]);
    assert_eq!(groups[0].1.len(), 2);
}

#[test]
fn latest_change_skips_baseline() {
    let series = build_series(
        &[MeasurementRecord::new(1, "A", 1800, 21, -35)],
        &SpiderConfig::default(),
    )
    .unwrap();
    assert_eq!(series[0].latest_change(), Some(-35.0));
    assert_eq!(series[0].weeks(), vec![0.0, 3.0]);
}
