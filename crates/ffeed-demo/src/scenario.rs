use std::sync::Arc;

use ffeed_core::{PostId, ToastQueue};
use ffeed_runtime::{
    ConnectivityMonitor, SimulatedLink, UpdateCoordinator, UpdateError, announce_restores,
};
use ffeed_store::{MemoryStore, StoreError};
use ffeed_widgets::{
    AuthorFilter, ConfirmationModal, FeedController, FeedPhase, PostCard, UNKNOWN_AUTHOR,
};

use crate::cli::ScenarioArgs;
use crate::error::{DemoError, Result};

/// Everything one scenario plays against.
struct Stage {
    link: SimulatedLink,
    monitor: ConnectivityMonitor,
    store: MemoryStore,
    toasts: ToastQueue,
    feed: FeedController,
}

impl Stage {
    async fn prepare(args: &ScenarioArgs) -> Self {
        let link = SimulatedLink::new();
        let monitor = ConnectivityMonitor::attach(&link);
        let store = MemoryStore::with_seed_data().with_per_page(args.per_page);
        let toasts = ToastQueue::new();
        let mut feed = FeedController::new(Arc::new(store.clone()));
        feed.load().await;
        Self {
            link,
            monitor,
            store,
            toasts,
            feed,
        }
    }
}

fn banner(title: &str) {
    println!();
    println!(
        "== {title} @ {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

fn print_feed(feed: &FeedController) {
    match feed.phase() {
        FeedPhase::Loading => println!("(loading)"),
        FeedPhase::Failed { message } => println!("feed failed: {message}"),
        FeedPhase::Ready => {
            let Some(page) = feed.page() else { return };
            println!(
                "page {} ({} of {} posts)",
                page.page(),
                page.len(),
                page.total()
            );
            for post in &page.items {
                let author = post.author.name.as_deref().unwrap_or(UNKNOWN_AUTHOR);
                println!("  #{:<3} {:<28} by {author}", post.id(), post.post.title);
            }
            if let Some(notice) = feed.empty_notice() {
                println!("  {notice}");
            }
            if let Some(pager) = feed.pagination() {
                println!("  {}", pager.summary());
            }
        }
    }
}

fn print_modal(modal: &ConfirmationModal) {
    if let Some(prompt) = modal.prompt() {
        println!("modal: {} | {}", prompt.title(), prompt.message());
    }
}

fn drain_toasts(toasts: &ToastQueue) {
    for toast in toasts.drain() {
        println!("toast ({:?}): {}", toast.kind, toast.message);
    }
}

/// Card for one loaded post, refresh hook wired back to the stage's feed.
fn card_for(stage: &Stage, id: PostId) -> Result<PostCard> {
    let page = stage
        .feed
        .page()
        .ok_or_else(|| DemoError::scenario_failed("feed did not load"))?;
    let post = page
        .items
        .iter()
        .find(|post| post.id() == id)
        .cloned()
        .ok_or(DemoError::Store(StoreError::NotFound(id)))?;
    let update =
        UpdateCoordinator::new(stage.monitor.signal()).with_refresh(stage.feed.refresh_hook());
    Ok(PostCard::new(
        post,
        Arc::new(stage.store.clone()),
        update,
        stage.toasts.clone(),
    ))
}

pub async fn run_success(args: &ScenarioArgs) -> Result<()> {
    banner("success: the delete commits");
    let mut stage = Stage::prepare(args).await;
    print_feed(&stage.feed);

    let mut card = card_for(&stage, PostId(args.post_id))?;
    card.request_delete();
    print_modal(card.modal());

    let receipt = card.confirm_delete().await?;
    println!("receipt: {}", serde_json::to_string_pretty(&receipt)?);
    drain_toasts(&stage.toasts);

    stage.feed.reload_if_stale().await;
    print_feed(&stage.feed);
    Ok(())
}

pub async fn run_failure(args: &ScenarioArgs) -> Result<()> {
    banner("failure: the delete rolls back");
    let mut stage = Stage::prepare(args).await;
    print_feed(&stage.feed);
    stage
        .store
        .fail_next_delete(StoreError::other("Failed to delete post"));

    let mut card = card_for(&stage, PostId(args.post_id))?;
    card.request_delete();
    print_modal(card.modal());

    match card.confirm_delete().await {
        Err(UpdateError::Remote(error)) => println!("rolled back: {error}"),
        Ok(_) | Err(UpdateError::Offline) => {
            return Err(DemoError::scenario_failed("failure"));
        }
    }
    drain_toasts(&stage.toasts);
    println!("card still visible: {}", !card.is_hidden());

    stage.feed.reload_if_stale().await;
    print_feed(&stage.feed);
    Ok(())
}

pub async fn run_offline(args: &ScenarioArgs) -> Result<()> {
    banner("offline: the gate rejects the delete");
    let stage = Stage::prepare(args).await;
    print_feed(&stage.feed);

    stage.link.set_online(false);
    println!("link: offline");

    let mut card = card_for(&stage, PostId(args.post_id))?;
    card.request_delete();
    print_modal(card.modal());

    match card.confirm_delete().await {
        Err(UpdateError::Offline) => println!("rejected: no connection"),
        Ok(_) | Err(UpdateError::Remote(_)) => {
            return Err(DemoError::scenario_failed("offline"));
        }
    }
    println!("card still visible: {}", !card.is_hidden());
    println!("offline flag: {}", card.delete_state().is_offline);
    Ok(())
}

pub async fn run_restore(args: &ScenarioArgs) -> Result<()> {
    banner("restore: the outage ends and the retry commits");
    let mut stage = Stage::prepare(args).await;
    let announcer = tokio::spawn(announce_restores(
        stage.monitor.signal(),
        stage.toasts.clone(),
    ));
    // One turn so the announcer attaches before the outage; the watch signal
    // keeps only the latest reading, so an unpolled announcer would miss the
    // offline leg entirely.
    tokio::task::yield_now().await;

    stage.link.set_online(false);
    println!("link: offline");
    tokio::task::yield_now().await;
    let mut card = card_for(&stage, PostId(args.post_id))?;
    card.request_delete();
    match card.confirm_delete().await {
        Err(UpdateError::Offline) => println!("rejected: no connection"),
        Ok(_) | Err(UpdateError::Remote(_)) => {
            announcer.abort();
            return Err(DemoError::scenario_failed("restore"));
        }
    }

    stage.link.set_online(true);
    println!("link: online");
    tokio::task::yield_now().await;
    drain_toasts(&stage.toasts);

    card.request_delete();
    let receipt = card.confirm_delete().await?;
    println!("receipt: {}", serde_json::to_string_pretty(&receipt)?);
    drain_toasts(&stage.toasts);

    announcer.abort();
    stage.feed.reload_if_stale().await;
    print_feed(&stage.feed);
    Ok(())
}

pub async fn run_browse(args: &ScenarioArgs) -> Result<()> {
    banner("browse: filter and page through the feed");
    let mut stage = Stage::prepare(args).await;
    print_feed(&stage.feed);

    let author = stage
        .feed
        .users()
        .iter()
        .find(|user| user.name.is_some())
        .map(|user| user.id);
    if let Some(author) = author {
        println!(
            "filter: {}",
            AuthorFilter::trigger_label(stage.feed.users(), Some(author))
        );
        stage.feed.select_author(Some(author)).await;
        print_feed(&stage.feed);
        stage.feed.select_author(None).await;
    }

    while stage.feed.page().is_some_and(|page| page.has_next()) {
        stage.feed.next_page().await;
        print_feed(&stage.feed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ScenarioArgs {
        ScenarioArgs {
            post_id: 1,
            per_page: 12,
        }
    }

    #[tokio::test]
    async fn every_scenario_runs_clean() {
        run_success(&args()).await.unwrap();
        run_failure(&args()).await.unwrap();
        run_offline(&args()).await.unwrap();
        run_restore(&args()).await.unwrap();
        run_browse(&args()).await.unwrap();
    }

    #[tokio::test]
    async fn paged_browse_walks_every_page() {
        let mut paged = args();
        paged.per_page = 5;
        run_browse(&paged).await.unwrap();
    }

    #[tokio::test]
    async fn a_missing_post_fails_the_scenario() {
        let mut bad = args();
        bad.post_id = 99;
        assert!(run_success(&bad).await.is_err());
    }
}
