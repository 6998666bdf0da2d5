//! Pure selection steps of the watch-history locator.
//!
//! The season and episode pickers fold from a sentinel sequence number of 0,
//! so unordered or sparse sequence numbers are fine and nothing needs to be
//! pre-sorted. A series with no qualifying season (or season with no usable
//! episode) resolves to the sentinel, i.e. `None`, and the removal fails
//! gracefully downstream.

use unwatch_api::types::{ContainerSummary, EpisodeCandidate, SeasonSummary, WatchHistoryEntry};

/// Container style the backend tags the continue-watching row with.
pub const CONTINUE_WATCHING_STYLE: &str = "ContinueWatchingSet";

/// Scan the home-collection containers for the continue-watching set
/// reference.
pub fn continue_watching_set(containers: &[ContainerSummary]) -> Option<&str> {
    containers
        .iter()
        .find(|c| c.style == CONTINUE_WATCHING_STYLE)
        .and_then(|c| c.set_ref.as_deref())
}

pub fn entry_by_id<'a>(
    items: &'a [WatchHistoryEntry],
    entry_id: &str,
) -> Option<&'a WatchHistoryEntry> {
    items.iter().find(|item| item.entry_id == entry_id)
}

/// The season with the highest sequence number among seasons that actually
/// contain episodes.
pub fn latest_season(seasons: &[SeasonSummary]) -> Option<&SeasonSummary> {
    let mut best: Option<&SeasonSummary> = None;
    let mut best_sequence = 0;
    for season in seasons {
        if season.episode_hits > 0 && season.season_sequence_number > best_sequence {
            best_sequence = season.season_sequence_number;
            best = Some(season);
        }
    }
    best
}

/// The episode with the highest sequence number within a season.
pub fn latest_episode(episodes: &[EpisodeCandidate]) -> Option<&EpisodeCandidate> {
    let mut best: Option<&EpisodeCandidate> = None;
    let mut best_sequence = 0;
    for episode in episodes {
        if episode.episode_sequence_number > best_sequence {
            best_sequence = episode.episode_sequence_number;
            best = Some(episode);
        }
    }
    best
}
