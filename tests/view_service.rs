//! The view service end to end, with answers scripted per test.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{page, PendingFetch, ScriptedSource};
use dataview::query::TransportError;
use dataview::service::{ServiceOptions, ViewHandle, ViewLayer};
use dataview::view::{
    MatchMode, SortDirection, ValidationError, Version, ViewIntent, ViewSchema, ViewStatus,
};
use dataview::DataViewError;
use tokio::task::JoinHandle;

fn start(options: ServiceOptions) -> (ViewHandle, ScriptedSource, JoinHandle<()>) {
    let source = ScriptedSource::new();
    let schema = Arc::new(ViewSchema::default());
    let (handle, server) = ViewLayer::new(schema, source.clone(), options);
    let task = tokio::spawn(server.run());
    (handle, source, task)
}

/// Starts the service and settles the initial load with 57 records.
async fn loaded(options: ServiceOptions) -> (ViewHandle, ScriptedSource, JoinHandle<()>) {
    let (handle, source, task) = start(options);
    let first: Vec<u64> = (1..=10).collect();
    source.next_fetch().await.respond(Ok(page(&first, 57)));
    handle.wait_settled().await.expect("initial load");
    (handle, source, task)
}

fn ids(handle: &ViewHandle) -> Vec<u64> {
    handle.snapshot().result.rows.iter().map(|r| r.id).collect()
}

async fn wait_abandoned(fetch: &PendingFetch) {
    for _ in 0..100 {
        if fetch.is_abandoned() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("superseded fetch was not aborted");
}

#[tokio::test]
async fn initial_load_fetches_first_page() {
    let (handle, source, _task) = start(ServiceOptions::default());
    assert_eq!(handle.snapshot().result.status, ViewStatus::Idle);

    let fetch = source.next_fetch().await;
    assert_eq!(fetch.request.skip, 0);
    assert_eq!(fetch.request.limit, 10);
    assert_eq!(fetch.request.sort, "id:asc");
    assert!(fetch.request.filters.is_empty());

    let first: Vec<u64> = (1..=10).collect();
    fetch.respond(Ok(page(&first, 57)));

    let snapshot = handle.wait_settled().await.unwrap();
    assert_eq!(snapshot.params.version, Version::new(0));
    assert_eq!(snapshot.result.total_count, 57);
    assert_eq!(snapshot.result.rows.len(), 10);
    assert_eq!(snapshot.page_count(), 6);
}

#[tokio::test]
async fn later_version_wins_regardless_of_arrival_order() {
    let options = ServiceOptions {
        abort_superseded: false,
        ..ServiceOptions::default()
    };
    let (handle, source, _task) = loaded(options).await;

    handle.set_page(50, 10).await.unwrap();
    let paged = source.next_fetch().await;
    assert_eq!(paged.request.skip, 50);

    handle
        .set_filter("gender", Some("male"), MatchMode::Equals)
        .await
        .unwrap();
    let filtered = source.next_fetch().await;
    assert_eq!(filtered.request.skip, 0);

    assert!(paged.respond(Ok(page(&[51, 52], 57))));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(handle.snapshot().result.is_loading());
    assert_eq!(ids(&handle), (1..=10).collect::<Vec<u64>>());

    filtered.respond(Ok(page(&[1, 3, 5], 29)));
    let snapshot = handle.wait_settled().await.unwrap();
    assert_eq!(ids(&handle), vec![1, 3, 5]);
    assert_eq!(snapshot.result.total_count, 29);
}

#[tokio::test]
async fn superseded_fetch_is_aborted() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;

    handle.set_page(10, 10).await.unwrap();
    let first = source.next_fetch().await;
    handle.set_page(20, 10).await.unwrap();
    let second = source.next_fetch().await;

    wait_abandoned(&first).await;
    assert!(!second.is_abandoned());

    second.respond(Ok(page(&[21], 57)));
    let snapshot = handle.wait_settled().await.unwrap();
    assert_eq!(snapshot.params.params.offset, 20);
    assert_eq!(ids(&handle), vec![21]);
}

#[tokio::test]
async fn debounce_sends_only_the_last_keystroke() {
    let options = ServiceOptions {
        filter_debounce: Duration::from_millis(100),
        ..ServiceOptions::default()
    };
    let (handle, source, _task) = loaded(options).await;

    for text in ["J", "Jo", "Joh"] {
        handle
            .set_filter("firstName", Some(text), MatchMode::StartsWith)
            .await
            .unwrap();
    }

    let fetch = source.next_fetch().await;
    assert_eq!(
        fetch.request.filters,
        vec![("firstName".to_string(), "Joh".to_string())]
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(source.parked(), 0);
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test]
async fn debounce_does_not_delay_paging() {
    let options = ServiceOptions {
        filter_debounce: Duration::from_secs(10),
        ..ServiceOptions::default()
    };
    let (handle, source, _task) = loaded(options).await;

    handle.set_page(10, 10).await.unwrap();
    let fetch = source.next_fetch().await;
    assert_eq!(fetch.request.skip, 10);
}

#[tokio::test]
async fn rejected_intent_changes_nothing() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;
    let before = handle.snapshot();

    let err = handle.set_page(0, 7).await.unwrap_err();
    assert!(matches!(
        err,
        DataViewError::Validation(ValidationError::UnsupportedPageSize { page_size: 7, .. })
    ));

    let err = handle
        .set_sort("phone", SortDirection::Asc)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Column 'phone' is not sortable");

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(handle.snapshot(), before);
    assert_eq!(source.requests().len(), 1);
}

#[tokio::test]
async fn failure_keeps_rows_and_reports_error() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;

    handle.refresh().await.unwrap();
    let error = TransportError::Status {
        status: 503,
        message: "unavailable".into(),
    };
    source.next_fetch().await.respond(Err(error.clone()));

    let err = handle.wait_settled().await.unwrap_err();
    assert!(matches!(err, DataViewError::Transport(ref e) if *e == error));

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.result.status, ViewStatus::Error);
    assert_eq!(snapshot.result.total_count, 57);
    assert_eq!(snapshot.result.rows.len(), 10);

    // Refresh is the retry.
    handle.refresh().await.unwrap();
    source.next_fetch().await.respond(Ok(page(&[1], 57)));
    let snapshot = handle.wait_settled().await.unwrap();
    assert_eq!(snapshot.result.error, None);
}

#[tokio::test]
async fn page_beyond_new_total_returns_to_first_page() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;

    handle.set_page(50, 10).await.unwrap();
    source.next_fetch().await.respond(Ok(page(&[], 5)));

    let retry = source.next_fetch().await;
    assert_eq!((retry.request.skip, retry.request.limit), (0, 10));
    retry.respond(Ok(page(&[1, 2, 3, 4, 5], 5)));

    let snapshot = handle.wait_settled().await.unwrap();
    assert_eq!(snapshot.params.params.offset, 0);
    assert_eq!(snapshot.result.total_count, 5);
    assert_eq!(snapshot.result.rows.len(), 5);
}

#[tokio::test]
async fn cleared_filter_is_left_out_of_the_request() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;

    handle
        .set_filter("address", Some("Oregon"), MatchMode::Contains)
        .await
        .unwrap();
    let fetch = source.next_fetch().await;
    assert_eq!(
        fetch.request.filters,
        vec![("address".to_string(), "Oregon".to_string())]
    );

    handle
        .set_filter("address", Some(""), MatchMode::Contains)
        .await
        .unwrap();
    let fetch = source.next_fetch().await;
    assert!(fetch.request.filters.is_empty());
}

#[tokio::test]
async fn repeated_sort_issues_identical_requests() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;

    let a = handle.set_sort("id", SortDirection::Asc).await.unwrap();
    let first = source.next_fetch().await;
    let b = handle.set_sort("id", SortDirection::Asc).await.unwrap();
    let second = source.next_fetch().await;

    assert_eq!(a.params, b.params);
    assert_eq!(b.version, a.version.next());
    assert_eq!(first.request, second.request);
}

#[tokio::test]
async fn dispatch_queues_without_waiting() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;

    handle
        .dispatch(ViewIntent::SetSort {
            field: "age".into(),
            direction: SortDirection::Desc,
        })
        .unwrap();

    let fetch = source.next_fetch().await;
    assert_eq!(fetch.request.sort, "age:desc");
}

#[tokio::test]
async fn server_stops_when_handles_are_dropped() {
    let (handle, source, task) = start(ServiceOptions::default());
    let fetch = source.next_fetch().await;

    let other = handle.clone();
    drop(handle);
    drop(other);

    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("server did not stop")
        .unwrap();
    wait_abandoned(&fetch).await;
}

#[tokio::test]
async fn subscribers_see_loading_then_ready() {
    let (handle, source, _task) = loaded(ServiceOptions::default()).await;
    let mut updates = handle.subscribe();
    updates.borrow_and_update();

    handle.set_page(10, 10).await.unwrap();
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().result.status, ViewStatus::Loading);

    source.next_fetch().await.respond(Ok(page(&[11], 57)));
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().result.status, ViewStatus::Ready);
}
