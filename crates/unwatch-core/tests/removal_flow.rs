//! End-to-end flow: header capture → session resolution → region binding →
//! click → telemetry → entry detached.

use std::cell::RefCell;
use std::sync::Mutex;

use unwatch_api::traits::ContentService;
use unwatch_api::types::{
    ContainerSummary, EpisodeCandidate, ProgressSample, SeasonSummary, SessionContext,
    WatchHistoryEntry,
};
use unwatch_core::{RemovalOutcome, Remover, RemoverConfig};
use unwatch_page::{tap, HostPage, PresenceMachine, PresenceState};

#[derive(Debug, thiserror::Error)]
#[error("backend unavailable")]
struct Unavailable;

#[derive(Default)]
struct Backend {
    set_queries: Mutex<Vec<String>>,
    progress: Mutex<Vec<ProgressSample>>,
}

impl ContentService for &Backend {
    type Error = Unavailable;

    async fn fetch_session_context(&self, token: &str) -> Result<SessionContext, Unavailable> {
        assert_eq!(token, "Bearer abc");
        Ok(SessionContext {
            kids_mode_enabled: false,
            implied_maturity_rating: 7,
            app_language: "en".into(),
            region: "US".into(),
        })
    }

    async fn fetch_home_collection(
        &self,
        _token: &str,
        ctx: &SessionContext,
    ) -> Result<Vec<ContainerSummary>, Unavailable> {
        assert_eq!(ctx.region, "US");
        Ok(vec![
            ContainerSummary {
                style: "hero".into(),
                set_ref: Some("H1".into()),
            },
            ContainerSummary {
                style: "ContinueWatchingSet".into(),
                set_ref: Some("S1".into()),
            },
        ])
    }

    async fn fetch_set_items(
        &self,
        _token: &str,
        _ctx: &SessionContext,
        set_id: &str,
    ) -> Result<Vec<WatchHistoryEntry>, Unavailable> {
        self.set_queries.lock().unwrap().push(set_id.to_string());
        Ok(vec![WatchHistoryEntry {
            entry_id: "X".into(),
            media_id: "M1".into(),
            elapsed_runtime_millis: 120_000,
            series_id: None,
        }])
    }

    async fn fetch_series_seasons(
        &self,
        _token: &str,
        _ctx: &SessionContext,
        _series_id: &str,
    ) -> Result<Vec<SeasonSummary>, Unavailable> {
        Err(Unavailable)
    }

    async fn fetch_season_episodes(
        &self,
        _token: &str,
        _ctx: &SessionContext,
        _season_id: &str,
    ) -> Result<Vec<EpisodeCandidate>, Unavailable> {
        Err(Unavailable)
    }

    async fn submit_progress(
        &self,
        token: &str,
        sample: &ProgressSample,
    ) -> Result<(), Unavailable> {
        assert_eq!(token, "Bearer abc");
        self.progress.lock().unwrap().push(sample.clone());
        Ok(())
    }
}

#[derive(Default)]
struct Page {
    location: RefCell<String>,
    entries: RefCell<Option<Vec<String>>>,
    controls: RefCell<Vec<String>>,
    detached: RefCell<Vec<String>>,
}

impl HostPage for &Page {
    fn current_location(&self) -> String {
        self.location.borrow().clone()
    }

    fn observe_region(&self) {}

    fn unobserve_region(&self) {}

    fn continue_watching_entries(&self) -> Option<Vec<String>> {
        self.entries.borrow().clone()
    }

    fn has_remove_control(&self, entry_id: &str) -> bool {
        self.controls.borrow().iter().any(|c| c == entry_id)
    }

    fn attach_remove_control(&self, entry_id: &str) {
        self.controls.borrow_mut().push(entry_id.to_string());
    }

    fn detach_entry(&self, entry_id: &str) {
        self.detached.borrow_mut().push(entry_id.to_string());
    }
}

#[tokio::test]
async fn removal_flow_end_to_end() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let backend = Backend::default();
    let remover = Remover::new(&backend, RemoverConfig::default());

    let page = Page::default();
    *page.location.borrow_mut() = "https://www.disneyplus.com/home".into();
    let mut presence = PresenceMachine::new(&page, remover.config().routes.allowed.clone());

    // The host issues a request carrying the bearer token; the tap forwards
    // the header into the pipeline.
    let headers = [
        ("Accept", "application/json"),
        ("Authorization", "Bearer abc"),
    ];
    if let Some(value) = tap::authorization_header(headers) {
        remover.ingest_authorization(value).await;
    }
    assert_eq!(remover.state().context().region, "US");

    // The continue-watching region renders and gets its control.
    presence.start();
    presence.on_region_mutation();
    assert_eq!(presence.state(), PresenceState::Watching);

    *page.entries.borrow_mut() = Some(vec!["X".into()]);
    presence.on_region_mutation();
    assert_eq!(presence.state(), PresenceState::Bound);
    assert_eq!(*page.controls.borrow(), vec!["X".to_string()]);

    // The viewer clicks the control.
    let outcome = remover.remove_entry("X").await.unwrap();
    assert_eq!(
        outcome,
        RemovalOutcome::Removed {
            entry_id: "X".into(),
            media_id: "M1".into(),
        }
    );
    if let RemovalOutcome::Removed { entry_id, .. } = &outcome {
        (&page).detach_entry(entry_id);
    }

    // One set query against the resolved reference, one telemetry call with
    // the entry's elapsed runtime, and the container gone from the page.
    assert_eq!(*backend.set_queries.lock().unwrap(), vec!["S1".to_string()]);
    let progress = backend.progress.lock().unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].media_id, "M1");
    assert_eq!(progress[0].play_head_seconds, 120.0);
    assert_eq!(*page.detached.borrow(), vec!["X".to_string()]);
}

#[tokio::test]
async fn failed_removal_leaves_control_in_place() {
    let backend = Backend::default();
    let remover = Remover::new(&backend, RemoverConfig::default());

    let page = Page::default();
    *page.location.borrow_mut() = "https://www.disneyplus.com/home".into();
    let mut presence = PresenceMachine::new(&page, remover.config().routes.allowed.clone());
    presence.start();
    *page.entries.borrow_mut() = Some(vec!["ghost".into()]);
    presence.on_region_mutation();

    remover.ingest_authorization("Bearer abc").await;

    // "ghost" is not in the set; the outcome is a silent no-op and the
    // control stays attached for a manual retry.
    let outcome = remover.remove_entry("ghost").await.unwrap();
    assert_eq!(outcome, RemovalOutcome::EntryNotFound);
    assert!(backend.progress.lock().unwrap().is_empty());
    assert_eq!(*page.controls.borrow(), vec!["ghost".to_string()]);
    assert!(page.detached.borrow().is_empty());
}
