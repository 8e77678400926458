#![forbid(unsafe_code)]

//! End-to-end flows for gated optimistic deletes.
//!
//! Each test tells one story against a real [`MemoryStore`] behind a
//! [`SimulatedLink`]: a delete that commits, a delete that rolls back, a
//! delete rejected offline and retried after the link returns, and the
//! restore announcer firing once per outage.

use std::pin::pin;
use std::sync::{Arc, Mutex};

use ffeed_core::{PostId, ToastQueue};
use ffeed_runtime::{
    ConnectivityMonitor, RESTORED_MESSAGE, SimulatedLink, UpdateCallbacks, UpdateCmd,
    UpdateCoordinator, UpdateError, announce_restores,
};
use ffeed_store::{MemoryStore, PostStore, StoreError};

/// A view's local cache of post ids, newest first.
type ViewList = Arc<Mutex<Vec<PostId>>>;

async fn seeded_view(store: &MemoryStore) -> ViewList {
    let page = store
        .posts(&ffeed_core::FeedQuery::new())
        .await
        .expect("seeded store lists posts");
    Arc::new(Mutex::new(page.items.iter().map(|post| post.id()).collect()))
}

fn contains(view: &ViewList, id: PostId) -> bool {
    view.lock().unwrap().contains(&id)
}

/// Builds the delete command a post card would issue: optimistically drop
/// the id from the view, call the store, and restore the captured view on
/// failure.
fn delete_cmd(
    store: &MemoryStore,
    view: &ViewList,
    id: PostId,
) -> UpdateCmd<ffeed_core::DeleteReceipt> {
    let snapshot = view.lock().unwrap().clone();
    let apply_view = Arc::clone(view);
    let rollback_view = Arc::clone(view);
    let store = store.clone();
    UpdateCmd::new(
        move || apply_view.lock().unwrap().retain(|&post| post != id),
        async move { store.delete_post(id).await.map_err(Into::into) },
        move || *rollback_view.lock().unwrap() = snapshot,
    )
}

#[tokio::test]
async fn delete_commits_and_triggers_a_refresh() {
    let link = SimulatedLink::new();
    let monitor = ConnectivityMonitor::attach(&link);
    let store = MemoryStore::with_seed_data().with_per_page(12);
    let view = seeded_view(&store).await;
    let refreshes = Arc::new(Mutex::new(0_u32));
    let coordinator = UpdateCoordinator::new(monitor.signal()).with_refresh({
        let refreshes = Arc::clone(&refreshes);
        move || *refreshes.lock().unwrap() += 1
    });

    let target = PostId(1);
    assert!(contains(&view, target));

    let receipt = coordinator
        .execute(delete_cmd(&store, &view, target), UpdateCallbacks::new())
        .await
        .expect("delete commits");

    assert_eq!(receipt.id, target);
    assert!(!contains(&view, target));
    assert!(!store.contains_post(target));
    assert_eq!(*refreshes.lock().unwrap(), 1);
    let state = coordinator.state();
    assert!(!state.is_optimistic);
    assert!(!state.is_error);
    assert!(!state.is_offline);
}

#[tokio::test]
async fn failed_delete_restores_the_view_and_keeps_the_error_text() {
    let link = SimulatedLink::new();
    let monitor = ConnectivityMonitor::attach(&link);
    let store = MemoryStore::with_seed_data().with_per_page(12);
    store.fail_next_delete(StoreError::other("Failed to delete post"));
    let view = seeded_view(&store).await;
    let coordinator = UpdateCoordinator::new(monitor.signal());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let target = PostId(1);
    let before = view.lock().unwrap().clone();
    let callbacks = UpdateCallbacks::new().with_error({
        let seen = Arc::clone(&seen);
        move |error: &UpdateError| seen.lock().unwrap().push(error.to_string())
    });

    let outcome = coordinator
        .execute(delete_cmd(&store, &view, target), callbacks)
        .await;

    assert!(outcome.is_err());
    assert_eq!(*view.lock().unwrap(), before);
    assert!(store.contains_post(target));
    assert_eq!(*seen.lock().unwrap(), vec!["Failed to delete post".to_owned()]);
    let state = coordinator.state();
    assert!(state.is_error);
    assert_eq!(
        state.error,
        Some(UpdateError::Remote(StoreError::other(
            "Failed to delete post"
        )))
    );
}

#[tokio::test]
async fn offline_delete_is_rejected_then_retried_after_restore() {
    let link = SimulatedLink::starting_offline();
    let monitor = ConnectivityMonitor::attach(&link);
    let store = MemoryStore::with_seed_data().with_per_page(12);
    let view = seeded_view(&store).await;
    let coordinator = UpdateCoordinator::new(monitor.signal());
    let offline_hits = Arc::new(Mutex::new(0_u32));
    let settled_hits = Arc::new(Mutex::new(0_u32));

    let target = PostId(1);
    let callbacks = UpdateCallbacks::new()
        .with_offline({
            let offline_hits = Arc::clone(&offline_hits);
            move || *offline_hits.lock().unwrap() += 1
        })
        .with_settled({
            let settled_hits = Arc::clone(&settled_hits);
            move || *settled_hits.lock().unwrap() += 1
        });

    let rejected = coordinator
        .execute(delete_cmd(&store, &view, target), callbacks)
        .await;

    assert_eq!(rejected, Err(UpdateError::Offline));
    assert!(contains(&view, target), "rejection must not touch the view");
    assert!(store.contains_post(target));
    assert_eq!(*offline_hits.lock().unwrap(), 1);
    assert_eq!(*settled_hits.lock().unwrap(), 0, "rejections never settle");
    assert!(coordinator.state().is_offline);

    link.set_online(true);
    let receipt = coordinator
        .execute(delete_cmd(&store, &view, target), UpdateCallbacks::new())
        .await
        .expect("retry commits once the link is back");

    assert_eq!(receipt.id, target);
    assert!(!contains(&view, target));
    assert!(!coordinator.state().is_offline, "gated pass clears the flag");
}

#[tokio::test]
async fn each_outage_announces_exactly_one_restoration() {
    let link = SimulatedLink::new();
    let monitor = ConnectivityMonitor::attach(&link);
    let toasts = ToastQueue::new();
    let mut announcer = pin!(announce_restores(monitor.signal(), toasts.clone()));
    assert!(futures::poll!(announcer.as_mut()).is_pending());

    for _ in 0..3 {
        link.set_online(false);
        assert!(futures::poll!(announcer.as_mut()).is_pending());
        link.set_online(true);
        assert!(futures::poll!(announcer.as_mut()).is_pending());

        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].message, RESTORED_MESSAGE);
    }

    // A quiet link announces nothing further.
    assert!(futures::poll!(announcer.as_mut()).is_pending());
    assert!(toasts.is_empty());
}
