use spider_core::{summarize, MeasurementRecord, Scalar, Snapshot, SpiderConfig, SpiderError};

fn cohort() -> Vec<MeasurementRecord> {
    vec![
        MeasurementRecord::new(3, "B", 3000, 7, 1),
        MeasurementRecord::new(1, "A", 1800, 7, -4),
        MeasurementRecord::new(1, "A", 1800, 14, -9),
        MeasurementRecord::new(2, "A", 1800, 7, 2),
        MeasurementRecord::new(3, "B", 3000, 14, 6),
    ]
}

#[test]
fn empty_input_yields_empty_summary() {
    let summary = summarize(&[]).unwrap();
    assert_eq!(summary.patient_count, 0);
    assert!(summary.arms.is_empty());
    assert!(summary.doses.is_empty());
    assert!(summary.is_empty());
}

#[test]
fn counts_distinct_patients_regardless_of_order() {
    let mut records = cohort();
    let forward = summarize(&records).unwrap();
    records.reverse();
    let backward = summarize(&records).unwrap();

    assert_eq!(forward.patient_count, 3);
    assert_eq!(backward.patient_count, 3);
}

#[test]
fn arms_are_sorted_and_unique() {
    let summary = summarize(&cohort()).unwrap();
    assert_eq!(summary.arms, vec!["A", "B"]);
    assert_eq!(summary.arms_label(), "A, B");
}

#[test]
fn doses_are_sorted_numerically() {
    let records = vec![
        MeasurementRecord::new(1, "A", 3000, 7, 0),
        MeasurementRecord::new(2, "A", 1800, 7, 0),
        MeasurementRecord::new(3, "A", 1800, 7, 0),
        MeasurementRecord::new(4, "A", 600, 7, 0),
    ];

    let summary = summarize(&records).unwrap();

    assert_eq!(
        summary.doses,
        vec![Scalar::Int(600), Scalar::Int(1800), Scalar::Int(3000)]
    );
    assert_eq!(summary.doses_label(), "600, 1800, 3000");
}

#[test]
fn numeric_and_text_doses_collapse() {
    let records = vec![
        MeasurementRecord::new(1, "A", "1800", 7, 0),
        MeasurementRecord::new(2, "A", 1800, 7, 0),
        MeasurementRecord::new(3, "B", "300", 7, 0),
    ];

    let summary = summarize(&records).unwrap();

    assert_eq!(summary.doses_label(), "300, 1800");
}

#[test]
fn non_numeric_dose_is_a_format_error() {
    let records = vec![MeasurementRecord::new(1, "A", "high", 7, 0)];
    let err = summarize(&records).unwrap_err();
    assert!(matches!(err, SpiderError::NotNumeric { field: "dose", .. }));
}

#[test]
fn summarize_is_idempotent() {
    let records = cohort();
    assert_eq!(summarize(&records).unwrap(), summarize(&records).unwrap());
}

#[test]
fn snapshot_combines_summary_and_series() {
    let snapshot = Snapshot::build(&cohort(), &SpiderConfig::default()).unwrap();

    assert_eq!(snapshot.summary.patient_count, 3);
    assert_eq!(snapshot.series.len(), 3);
    assert_eq!(snapshot.traces().len(), 3);
    assert_eq!(snapshot.series[0].subject_id, "3");
}
