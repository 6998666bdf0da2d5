//! Trait seam between the orchestration core and the backend client.
//!
//! The core drives everything through `ContentService`, so it can be exercised
//! in tests with a recording mock while `BamClient` is the one real
//! implementation.

use std::future::Future;

use crate::types::{
    ContainerSummary, EpisodeCandidate, ProgressSample, SeasonSummary, SessionContext,
    WatchHistoryEntry,
};

/// The backend operations the removal pipeline needs.
///
/// Every method takes the captured bearer credential explicitly: the token is
/// harvested from the host's own traffic after the client is constructed and
/// may be overwritten on renewal, so it is state the caller owns, not the
/// client.
pub trait ContentService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// One combined query for the viewer's profile and session attributes.
    fn fetch_session_context(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<SessionContext, Self::Error>> + Send;

    /// The containers of the viewer's personalized home collection.
    fn fetch_home_collection(
        &self,
        token: &str,
        ctx: &SessionContext,
    ) -> impl Future<Output = Result<Vec<ContainerSummary>, Self::Error>> + Send;

    /// The items of one set, by set reference.
    fn fetch_set_items(
        &self,
        token: &str,
        ctx: &SessionContext,
        set_id: &str,
    ) -> impl Future<Output = Result<Vec<WatchHistoryEntry>, Self::Error>> + Send;

    /// The seasons of a series.
    fn fetch_series_seasons(
        &self,
        token: &str,
        ctx: &SessionContext,
        series_id: &str,
    ) -> impl Future<Output = Result<Vec<SeasonSummary>, Self::Error>> + Send;

    /// The episodes of one season.
    fn fetch_season_episodes(
        &self,
        token: &str,
        ctx: &SessionContext,
        season_id: &str,
    ) -> impl Future<Output = Result<Vec<EpisodeCandidate>, Self::Error>> + Send;

    /// Submit one playback-progress report.
    fn submit_progress(
        &self,
        token: &str,
        sample: &ProgressSample,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
