use std::sync::Arc;
use std::time::Duration;

use super::{ApplyOutcome, Dispatcher, DispatcherConfig};
use crate::backend::mock::{MockFailure, MockSearchBackend};
use crate::backend::BackendError;
use crate::model::Document;

const WINDOW: Duration = Duration::from_millis(300);

fn dispatcher(
    backend: Arc<MockSearchBackend>,
) -> (
    Dispatcher<MockSearchBackend>,
    tokio::sync::mpsc::UnboundedReceiver<super::SearchOutcome>,
) {
    Dispatcher::new(
        backend,
        DispatcherConfig {
            window: WINDOW,
            min_query_len: 3,
        },
    )
}

#[tokio::test(start_paused = true)]
async fn test_burst_issues_single_search_with_last_text() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.insert_response("cats!", vec![Document::new("http://a")]);
    let (mut dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("cat");
    dispatcher.on_text_changed("cats");
    dispatcher.on_text_changed("cats!");

    tokio::time::sleep(WINDOW + Duration::from_millis(50)).await;

    let outcome = rx.recv().await.unwrap();
    assert_eq!(backend.call_count(), 1);
    assert_eq!(backend.calls(), vec!["cats!".to_string()]);

    match dispatcher.apply(outcome) {
        ApplyOutcome::Applied { documents, .. } => {
            assert_eq!(documents.len(), 1);
            assert_eq!(documents[0].id, "http://a");
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_short_text_resolves_empty_without_backend_call() {
    let backend = Arc::new(MockSearchBackend::new());
    let (mut dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("ab");

    // Delivered synchronously, no debounce and no network.
    let outcome = rx.try_recv().unwrap();
    assert_eq!(backend.call_count(), 0);

    match dispatcher.apply(outcome) {
        ApplyOutcome::Applied { documents, .. } => assert!(documents.is_empty()),
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_short_text_cancels_pending_schedule() {
    let backend = Arc::new(MockSearchBackend::new());
    let (dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("cats");
    dispatcher.on_text_changed("ab");

    tokio::time::sleep(WINDOW * 2).await;

    // Only the immediate empty outcome; the "cats" timer went stale.
    let outcome = rx.recv().await.unwrap();
    assert!(outcome.result.as_ref().is_ok_and(|docs| docs.is_empty()));
    assert!(rx.try_recv().is_err());
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_completion_is_superseded() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.insert_response("slow query", vec![Document::new("http://old")]);
    backend.insert_response("fast!", vec![Document::new("http://new")]);
    backend.set_delay("slow query", Duration::from_millis(500));
    let (mut dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("slow query");
    tokio::time::sleep(WINDOW + Duration::from_millis(50)).await;

    // First request is now in flight; initiate a second one.
    dispatcher.on_text_changed("fast!");
    tokio::time::sleep(WINDOW + Duration::from_millis(50)).await;

    // The fast request completes first.
    let first = rx.recv().await.unwrap();
    assert_eq!(first.text, "fast!");
    match dispatcher.apply(first) {
        ApplyOutcome::Applied { documents, .. } => assert_eq!(documents[0].id, "http://new"),
        other => panic!("expected Applied, got {other:?}"),
    }

    // The slow response arrives afterwards and must be a no-op.
    tokio::time::sleep(Duration::from_millis(600)).await;
    let late = rx.recv().await.unwrap();
    assert_eq!(late.text, "slow query");
    assert!(dispatcher.apply(late).is_superseded());

    assert_eq!(backend.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_response_superseded_by_pending_schedule() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.insert_response("slow cats", vec![Document::new("http://old")]);
    backend.insert_response("fresh dogs", vec![Document::new("http://new")]);
    backend.set_delay("slow cats", Duration::from_millis(200));
    let (mut dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("slow cats");
    tokio::time::sleep(WINDOW + Duration::from_millis(50)).await;

    // The first request is in flight. Schedule a newer text change and let
    // the first response arrive while the new one is still inside its
    // debounce window.
    dispatcher.on_text_changed("fresh dogs");
    tokio::time::sleep(Duration::from_millis(200)).await;

    let stale = rx.recv().await.unwrap();
    assert_eq!(stale.text, "slow cats");
    assert!(dispatcher.apply(stale).is_superseded());

    tokio::time::sleep(WINDOW).await;
    let fresh = rx.recv().await.unwrap();
    match dispatcher.apply(fresh) {
        ApplyOutcome::Applied { documents, .. } => assert_eq!(documents[0].id, "http://new"),
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_short_text_supersedes_in_flight_request() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.insert_response("slow query", vec![Document::new("http://old")]);
    backend.set_delay("slow query", Duration::from_millis(500));
    let (mut dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("slow query");
    tokio::time::sleep(WINDOW + Duration::from_millis(50)).await;

    dispatcher.on_text_changed("ab");

    let empty = rx.recv().await.unwrap();
    match dispatcher.apply(empty) {
        ApplyOutcome::Applied { documents, .. } => assert!(documents.is_empty()),
        other => panic!("expected Applied, got {other:?}"),
    }

    tokio::time::sleep(Duration::from_millis(600)).await;
    let late = rx.recv().await.unwrap();
    assert!(dispatcher.apply(late).is_superseded());
}

#[tokio::test(start_paused = true)]
async fn test_backend_failure_surfaces_without_clobbering() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.fail_with(MockFailure::Unavailable);
    let (mut dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("cats");
    tokio::time::sleep(WINDOW + Duration::from_millis(50)).await;

    let outcome = rx.recv().await.unwrap();
    match dispatcher.apply(outcome) {
        ApplyOutcome::Failed { error, .. } => {
            assert!(matches!(error, BackendError::Unavailable { .. }));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_sequence_numbers_are_monotonic() {
    let backend = Arc::new(MockSearchBackend::new());
    let (mut dispatcher, mut rx) = dispatcher(Arc::clone(&backend));

    dispatcher.on_text_changed("first query");
    tokio::time::sleep(WINDOW * 2).await;
    dispatcher.on_text_changed("second query");
    tokio::time::sleep(WINDOW * 2).await;

    let a = rx.recv().await.unwrap();
    let b = rx.recv().await.unwrap();
    assert!(a.seq < b.seq);
    assert_eq!(dispatcher.last_scheduled(), b.seq);

    dispatcher.apply(a);
    let applied = dispatcher.apply(b);
    assert!(!applied.is_superseded());
    assert_eq!(dispatcher.last_applied(), applied.seq());
}
