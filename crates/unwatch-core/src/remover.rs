//! The completion orchestrator.
//!
//! Drives credential ingestion, lazy collection/entry resolution and the
//! synthetic-completion telemetry that makes the backend drop an entry from
//! the continue-watching set.

use tracing::{debug, info, warn};
use unwatch_api::traits::ContentService;
use unwatch_api::types::{ProgressSample, SessionContext, WatchHistoryEntry};

use crate::config::RemoverConfig;
use crate::error::RemoverError;
use crate::locator;
use crate::session::{CollectionGate, CredentialCapture, SessionState};

/// Terminal state of one removal invocation.
///
/// Every non-`Removed` variant is a silent no-op at the UI: the control stays
/// in place and invoking it again re-runs the full resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Telemetry accepted; the entry's container can be detached.
    Removed { entry_id: String, media_id: String },
    /// No `Authorization` value has been observed yet.
    NoCredential,
    /// The continue-watching collection could not be (or was never) resolved.
    CollectionUnavailable,
    /// The target entry is not in the set.
    EntryNotFound,
    /// Series entry whose latest season/episode could not be determined.
    LatestEpisodeUnavailable,
}

/// Owns the whole pipeline: session state, configuration and the backend
/// service it drives.
pub struct Remover<S: ContentService> {
    service: S,
    state: SessionState,
    config: RemoverConfig,
}

impl<S: ContentService> Remover<S> {
    pub fn new(service: S, config: RemoverConfig) -> Self {
        Self {
            service,
            state: SessionState::new(),
            config,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &RemoverConfig {
        &self.config
    }

    /// Feed one captured `Authorization` value in.
    ///
    /// The first successful capture triggers session-context resolution,
    /// exactly once per page lifetime. This path runs on events forwarded
    /// from the host's own networking, so it swallows every failure: a
    /// failed resolution leaves the default context in place for good.
    pub async fn ingest_authorization(&self, value: &str) {
        if self.state.capture_credential(value) == CredentialCapture::Ignored {
            return;
        }
        if !self.state.try_begin_context_resolution() {
            return;
        }
        let Some(token) = self.state.credential() else {
            return;
        };

        match self.service.fetch_session_context(&token).await {
            Ok(context) => {
                info!(region = %context.region, language = %context.app_language, "session context resolved");
                self.state.install_context(context);
            }
            Err(e) => {
                warn!(error = %e, "session context resolution failed, keeping defaults");
            }
        }
    }

    /// Feed a watch-history response body the host fetched itself. Parsed
    /// best-effort into the snoop cache; anything unparseable is dropped.
    pub fn ingest_watch_history_response(&self, body: &str) {
        match unwatch_api::bam::parse_set_items(body) {
            Ok(entries) => {
                debug!(count = entries.len(), "snooped watch-history entries");
                self.state.snoop_entries(entries);
            }
            Err(e) => {
                debug!(error = %e, "ignoring unparseable watch-history response");
            }
        }
    }

    /// Remove one continue-watching entry by marking it watched.
    ///
    /// Resolution is re-run from scratch on every invocation; nothing about
    /// an in-progress removal is cached, so a failed attempt can simply be
    /// retried by the user.
    pub async fn remove_entry(&self, entry_id: &str) -> Result<RemovalOutcome, RemoverError> {
        let Some(token) = self.state.credential() else {
            debug!(entry_id, "removal requested before any credential capture");
            return Ok(RemovalOutcome::NoCredential);
        };
        let ctx = self.state.context();

        let Some(set_id) = self.ensure_collection(&token, &ctx).await? else {
            return Ok(RemovalOutcome::CollectionUnavailable);
        };

        let entry = match self.resolve_entry(&token, &ctx, &set_id, entry_id).await? {
            Some(entry) => entry,
            None => {
                debug!(entry_id, "entry not present in continue-watching set");
                return Ok(RemovalOutcome::EntryNotFound);
            }
        };

        let media_id = if let Some(series_id) = &entry.series_id {
            match self.complete_series(&token, &ctx, series_id).await? {
                Some(media_id) => media_id,
                None => return Ok(RemovalOutcome::LatestEpisodeUnavailable),
            }
        } else {
            self.submit(&token, &entry.media_id, entry.elapsed_runtime_millis)
                .await?;
            entry.media_id.clone()
        };

        info!(entry_id, media_id = %media_id, "entry marked watched");
        Ok(RemovalOutcome::Removed {
            entry_id: entry_id.to_string(),
            media_id,
        })
    }

    /// Lazy, memoized collection resolution. Attempted at most once per page
    /// lifetime; a failed or empty attempt settles as unavailable and later
    /// removals become no-ops rather than retries.
    async fn ensure_collection(
        &self,
        token: &str,
        ctx: &SessionContext,
    ) -> Result<Option<String>, RemoverError> {
        match self.state.begin_collection_resolution() {
            CollectionGate::Resolved(set_id) => Ok(Some(set_id)),
            CollectionGate::Busy | CollectionGate::Unavailable => Ok(None),
            CollectionGate::Begin => match self.service.fetch_home_collection(token, ctx).await {
                Ok(containers) => {
                    let set_id = locator::continue_watching_set(&containers).map(str::to_owned);
                    match &set_id {
                        Some(id) => info!(set_id = %id, "continue-watching collection resolved"),
                        None => warn!("no continue-watching container in home collection"),
                    }
                    self.state.finish_collection_resolution(set_id.clone());
                    Ok(set_id)
                }
                Err(e) => {
                    self.state.finish_collection_resolution(None);
                    Err(RemoverError::Service(e.to_string()))
                }
            },
        }
    }

    async fn resolve_entry(
        &self,
        token: &str,
        ctx: &SessionContext,
        set_id: &str,
        entry_id: &str,
    ) -> Result<Option<WatchHistoryEntry>, RemoverError> {
        if let Some(entry) = self.state.snooped_entry(entry_id) {
            debug!(entry_id, "entry resolved from snooped response");
            return Ok(Some(entry));
        }

        let items = self
            .service
            .fetch_set_items(token, ctx, set_id)
            .await
            .map_err(|e| RemoverError::Service(e.to_string()))?;
        Ok(locator::entry_by_id(&items, entry_id).cloned())
    }

    /// Series path: resolve the latest-aired episode, then submit the priming
    /// report followed by the completion report, strictly in that order. The
    /// backend only honors a completion-sized play head once a play session
    /// exists for the episode.
    async fn complete_series(
        &self,
        token: &str,
        ctx: &SessionContext,
        series_id: &str,
    ) -> Result<Option<String>, RemoverError> {
        let seasons = self
            .service
            .fetch_series_seasons(token, ctx, series_id)
            .await
            .map_err(|e| RemoverError::Service(e.to_string()))?;
        let Some(season) = locator::latest_season(&seasons) else {
            debug!(series_id, "series has no season with episodes");
            return Ok(None);
        };

        let episodes = self
            .service
            .fetch_season_episodes(token, ctx, &season.season_id)
            .await
            .map_err(|e| RemoverError::Service(e.to_string()))?;
        let Some(episode) = locator::latest_episode(&episodes) else {
            debug!(series_id, season_id = %season.season_id, "season has no usable episode");
            return Ok(None);
        };

        self.submit(
            token,
            &episode.media_id,
            self.config.telemetry.priming_play_head_millis,
        )
        .await?;
        self.submit(token, &episode.media_id, episode.runtime_millis)
            .await?;

        Ok(Some(episode.media_id.clone()))
    }

    async fn submit(&self, token: &str, media_id: &str, millis: u64) -> Result<(), RemoverError> {
        let sample = ProgressSample {
            media_id: media_id.to_string(),
            play_head_seconds: millis as f64 / 1000.0,
        };
        self.service
            .submit_progress(token, &sample)
            .await
            .map_err(|e| RemoverError::Service(e.to_string()))
    }
}
