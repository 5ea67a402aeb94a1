use spider_core::{FailurePresentation, LoadState, RequestTracker};

#[test]
fn only_latest_token_is_current() {
    let mut tracker = RequestTracker::new();
    let first = tracker.issue();
    let second = tracker.issue();
    assert!(!tracker.is_current(first));
    assert!(tracker.is_current(second));
    assert_eq!(tracker.accept(first, "stale"), None);
    assert_eq!(tracker.accept(second, "fresh"), Some("fresh"));
}

#[test]
fn failures_stay_distinct_from_empty() {
    let failed: LoadState<Vec<u8>> = LoadState::Failed("boom".into());
    let empty: LoadState<Vec<u8>> = LoadState::Loaded(Vec::new());

    assert_eq!(failed.items(FailurePresentation::TreatAsEmpty), Some(&[][..]));
    assert!(failed.is_failed());
    assert!(!empty.is_failed());
    assert_eq!(empty.items(FailurePresentation::TreatAsEmpty), Some(&[][..]));
    assert_eq!(failed.visible_error(FailurePresentation::ShowError), Some("boom"));
    assert_eq!(failed.visible_error(FailurePresentation::TreatAsEmpty), None);
    assert_eq!(failed.items(FailurePresentation::ShowError), None);
}

#[test]
fn loading_has_nothing_to_show() {
    let state: LoadState<Vec<u8>> = LoadState::default();
    assert!(state.is_loading());
    assert_eq!(state.items(FailurePresentation::TreatAsEmpty), None);
    assert_eq!(state.visible_error(FailurePresentation::ShowError), None);
}
