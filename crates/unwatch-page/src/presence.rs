use tracing::debug;

use crate::host::HostPage;

/// Where the machine stands relative to the continue-watching region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    /// No observer attached.
    Idle,
    /// Observer attached, waiting for the region and its entries to render.
    Watching,
    /// Region found, controls attached, observer detached.
    Bound,
}

/// Watches for the continue-watching region and keeps exactly one remove
/// control per visible entry, re-arming itself across client-side navigation.
///
/// The host never issues a full page load when navigating back to the home
/// view, so a separate, permanently-active location watcher feeds
/// [`on_location_mutation`](Self::on_location_mutation); a change onto an
/// allow-listed route drops the machine back to `Watching` regardless of its
/// current state.
pub struct PresenceMachine<P: HostPage> {
    page: P,
    state: PresenceState,
    recorded_location: String,
    allowed_routes: Vec<String>,
}

impl<P: HostPage> PresenceMachine<P> {
    pub fn new(page: P, allowed_routes: Vec<String>) -> Self {
        let recorded_location = page.current_location();
        Self {
            page,
            state: PresenceState::Idle,
            recorded_location,
            allowed_routes,
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// `Idle → Watching`: attach the region observer.
    pub fn start(&mut self) {
        if self.state == PresenceState::Idle {
            self.page.observe_region();
            self.state = PresenceState::Watching;
        }
    }

    /// A structural mutation fired while observing. `Watching → Bound` once
    /// the region and at least one entry have rendered.
    pub fn on_region_mutation(&mut self) {
        if self.state != PresenceState::Watching {
            return;
        }
        let Some(entries) = self.page.continue_watching_entries() else {
            return;
        };
        if entries.is_empty() {
            return;
        }

        for entry_id in &entries {
            // The page may mutate the same region several times before it
            // settles; an entry that already carries a control is skipped.
            if !self.page.has_remove_control(entry_id) {
                self.page.attach_remove_control(entry_id);
            }
        }

        debug!(entries = entries.len(), "continue-watching region bound");
        self.page.unobserve_region();
        self.state = PresenceState::Bound;
    }

    /// The location watcher fired. A change onto an allow-listed route
    /// re-arms the region observer; anything else is ignored and the
    /// recorded location stays put.
    pub fn on_location_mutation(&mut self) {
        let href = self.page.current_location();
        if href == self.recorded_location {
            return;
        }
        if !self.allowed_routes.iter().any(|route| href.starts_with(route)) {
            return;
        }

        debug!(%href, "navigated to a watched route, re-arming");
        self.recorded_location = href;
        self.page.observe_region();
        self.state = PresenceState::Watching;
    }
}
