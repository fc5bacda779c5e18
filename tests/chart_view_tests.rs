// ChartView state machine: loading, no results, selection, stale responses

mod common;

use common::{loaded, no_results, two_snapshot_history};
use crn_tracker::chart_view::{Applied, ChartView};
use crn_tracker::config::TimestampUnit;
use crn_tracker::format::TimestampFormat;
use crn_tracker::history_client::FetchError;
use crn_tracker::models::{Snapshot, ViewFrame};
use crn_tracker::route::Route;

fn view(path: &str) -> ChartView {
    ChartView::new(
        Route::from_path(path, "1"),
        false,
        TimestampFormat::utc(TimestampUnit::Seconds),
    )
}

#[test]
fn starts_loading_for_resolved_identifier() {
    let v = view("/54321");
    assert_eq!(v.identifier(), "54321");
    assert!(matches!(v.frame(), ViewFrame::Loading { .. }));
    assert_eq!(v.request().path_and_query(), "/v1/seats/history/54321?optimized=0");

    let bare = view("");
    assert_eq!(bare.identifier(), "1");
    assert_eq!(bare.request().path_and_query(), "/v1/seats/history/1");
}

#[test]
fn load_selects_most_recent_snapshot() {
    let mut v = view("/30127");
    let tag = v.tag();
    assert_eq!(v.apply(&tag, Ok(loaded(two_snapshot_history()))), Applied::Loaded);

    let state = v.chart_state().unwrap();
    assert_eq!(state.selected_index(), 1);
    assert_eq!(state.scale_max(), 10);

    match v.frame() {
        ViewFrame::Ready {
            bars,
            slider,
            as_of,
            ..
        } => {
            assert_eq!(slider.max, 1);
            assert_eq!(slider.value, 1);
            assert!((bars[0].fraction - 0.8).abs() < 1e-9);
            assert!((bars[1].fraction - 0.7).abs() < 1e-9);
            assert!((bars[2].fraction - 0.2).abs() < 1e-9);
            assert_eq!(as_of.as_deref(), Some("Nov 14, 2023 at 11:13:20 PM"));
        }
        other => panic!("expected ready frame, got {other:?}"),
    }
}

#[test]
fn reload_resets_selection_to_last_index() {
    let mut v = view("/30127");
    let tag = v.tag();
    v.apply(&tag, Ok(loaded(two_snapshot_history())));
    assert!(v.select(0));

    let mut longer = two_snapshot_history();
    longer.push(Snapshot::new(1_700_007_200, 6, 9, 3));
    assert_eq!(v.apply(&tag, Ok(loaded(longer))), Applied::Loaded);
    assert_eq!(v.chart_state().unwrap().selected_index(), 2);
}

#[test]
fn select_changes_only_the_index() {
    let mut v = view("/30127");
    let tag = v.tag();
    v.apply(&tag, Ok(loaded(two_snapshot_history())));
    let request_before = v.request();

    assert!(v.select(0));
    let state = v.chart_state().unwrap();
    assert_eq!(state.selected_index(), 0);
    assert_eq!(state.scale_max(), 10);
    assert_eq!(state.displayed().seats_available, Some(10));
    assert_eq!(v.request(), request_before);

    // Clamped to the last snapshot; selecting the current index is not a change.
    assert!(v.select(99));
    assert_eq!(v.chart_state().unwrap().selected_index(), 1);
    assert!(!v.select(1));
}

#[test]
fn select_before_load_is_a_no_op() {
    let mut v = view("/30127");
    assert!(!v.select(3));
    assert!(v.chart_state().is_none());
}

#[test]
fn no_results_suppresses_chart_even_with_history() {
    let mut v = view("/0");
    let tag = v.tag();
    let mut response = no_results();
    response.history = two_snapshot_history();
    assert_eq!(v.apply(&tag, Ok(response)), Applied::NoResults);
    assert!(v.is_no_results());
    assert!(v.chart_state().is_none());
    assert!(matches!(v.frame(), ViewFrame::NoResults { .. }));
}

#[test]
fn empty_history_without_warning_is_no_results() {
    let mut v = view("/30127");
    let tag = v.tag();
    assert_eq!(v.apply(&tag, Ok(loaded(vec![]))), Applied::NoResults);
}

#[test]
fn failure_keeps_loading() {
    let mut v = view("/30127");
    let tag = v.tag();
    let err = FetchError::Decode("expected value at line 1 column 1".into());
    assert_eq!(v.apply(&tag, Err(err)), Applied::Failed);
    assert!(matches!(v.frame(), ViewFrame::Loading { .. }));
}

#[test]
fn stale_response_is_discarded_after_navigation() {
    let mut v = view("/111");
    let old_tag = v.tag();
    let request = v.navigate(Route::from_path("/222", "1")).expect("new CRN fetches");
    assert_eq!(request.tag.identifier, "222");

    assert_eq!(v.apply(&old_tag, Ok(loaded(two_snapshot_history()))), Applied::Stale);
    assert!(matches!(v.frame(), ViewFrame::Loading { .. }));

    assert_eq!(v.apply(&request.tag, Ok(no_results())), Applied::NoResults);
    assert_eq!(v.frame().identifier(), "222");
}

#[test]
fn navigating_to_same_route_does_not_refetch() {
    let mut v = view("/111");
    assert!(v.navigate(Route::from_path("/111", "1")).is_none());
}

#[test]
fn optimized_toggle_refetches_and_drops_old_tag() {
    let mut v = view("/30127");
    let plain = v.tag();
    v.apply(&plain, Ok(loaded(two_snapshot_history())));

    let request = v.set_optimized(true).expect("toggle fetches");
    assert_eq!(request.path_and_query(), "/v1/seats/history/30127?optimized=1");
    assert!(v.set_optimized(true).is_none());

    // Previous chart stays up until the optimized history lands.
    assert!(v.frame().is_ready());
    assert_eq!(v.apply(&plain, Ok(loaded(vec![Snapshot::new(5, 1, 1, 1)]))), Applied::Stale);
    assert_eq!(v.chart_state().unwrap().len(), 2);

    let optimized = vec![Snapshot::new(5, 1, 1, 1)];
    assert_eq!(v.apply(&request.tag, Ok(loaded(optimized))), Applied::Loaded);
    assert_eq!(v.chart_state().unwrap().len(), 1);
}

#[test]
fn optimized_toggle_on_bare_route_keeps_chart() {
    let mut v = view("");
    let tag = v.tag();
    v.apply(&tag, Ok(loaded(two_snapshot_history())));
    assert!(v.select(0));

    // The bare request carries no flag, so toggling has nothing to refetch.
    assert!(v.set_optimized(true).is_none());
    assert!(v.optimized());
    assert_eq!(v.tag(), tag);
    assert_eq!(v.request().path_and_query(), "/v1/seats/history/1");
    assert_eq!(v.chart_state().unwrap().selected_index(), 0);
    match v.frame() {
        ViewFrame::Ready { optimized, .. } => assert!(optimized),
        other => panic!("expected ready frame, got {other:?}"),
    }

    // A completion issued before the toggle still applies.
    assert_eq!(v.apply(&tag, Ok(loaded(two_snapshot_history()))), Applied::Loaded);
}

#[test]
fn missing_metric_renders_blank_bar() {
    let mut v = view("/30127");
    let tag = v.tag();
    let snapshot = Snapshot {
        timestamp: None,
        seats_available: Some(4),
        seats_reserved: None,
        waitlist: Some(2),
    };
    v.apply(&tag, Ok(loaded(vec![snapshot])));
    match v.frame() {
        ViewFrame::Ready { bars, as_of, .. } => {
            assert_eq!(bars[1].value, None);
            assert_eq!(bars[1].value_label(), "");
            assert_eq!(bars[1].fraction, 0.0);
            assert_eq!(bars[0].fraction, 1.0);
            assert_eq!(as_of, None);
        }
        other => panic!("expected ready frame, got {other:?}"),
    }
}
