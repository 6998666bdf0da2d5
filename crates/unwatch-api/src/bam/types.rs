//! Wire shapes for the BAM services, and conversions into the shared model.
//!
//! Content responses arrive as `{"data": {"<PayloadKey>": {...}}}` where the
//! key names the query ("ContinueWatchingSet", "PersonalizedCollection",
//! "DmcSeriesBundle", ...). The key is not stable across queries, so the
//! payload is pulled out of the `data` object dynamically, the way the host's
//! own frontend consumes it.

use serde::Deserialize;
use serde_json::Value;

use super::error::BamError;
use crate::types::{
    ContainerSummary, EpisodeCandidate, SeasonSummary, SessionContext, WatchHistoryEntry,
};

#[derive(Debug, Deserialize)]
struct ContentEnvelope {
    data: serde_json::Map<String, Value>,
}

/// Pull the first non-null payload out of a content envelope.
fn content_payload(body: &str) -> Result<Value, BamError> {
    let envelope: ContentEnvelope =
        serde_json::from_str(body).map_err(|e| BamError::Parse(e.to_string()))?;
    envelope
        .data
        .into_iter()
        .map(|(_, v)| v)
        .find(|v| !v.is_null())
        .ok_or_else(|| BamError::Parse("empty content payload".into()))
}

fn from_payload<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, BamError> {
    serde_json::from_value(content_payload(body)?).map_err(|e| BamError::Parse(e.to_string()))
}

// ── Set items ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SetPayload {
    #[serde(default)]
    items: Vec<SetItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetItem {
    content_id: String,
    media_metadata: Option<WireMediaMetadata>,
    encoded_series_id: Option<String>,
    series_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMediaMetadata {
    media_id: String,
    runtime_millis: u64,
}

/// Parse the items of a set response (a `SetBySetId` query, or the host's own
/// continue-watching response observed by the tap). Items without playable
/// media metadata are skipped.
pub fn parse_set_items(body: &str) -> Result<Vec<WatchHistoryEntry>, BamError> {
    let set: SetPayload = from_payload(body)?;
    Ok(set
        .items
        .into_iter()
        .filter_map(|item| {
            let meta = item.media_metadata?;
            Some(WatchHistoryEntry {
                entry_id: item.content_id,
                media_id: meta.media_id,
                elapsed_runtime_millis: meta.runtime_millis,
                series_id: item.encoded_series_id.or(item.series_id),
            })
        })
        .collect())
}

// ── Collection containers ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CollectionPayload {
    #[serde(default)]
    containers: Vec<WireContainer>,
}

#[derive(Debug, Deserialize)]
struct WireContainer {
    style: Option<String>,
    set: Option<WireSetRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSetRef {
    ref_id: Option<String>,
}

pub fn parse_collection_containers(body: &str) -> Result<Vec<ContainerSummary>, BamError> {
    let collection: CollectionPayload = from_payload(body)?;
    Ok(collection
        .containers
        .into_iter()
        .map(|c| ContainerSummary {
            style: c.style.unwrap_or_default(),
            set_ref: c.set.and_then(|s| s.ref_id),
        })
        .collect())
}

// ── Series bundle (seasons) ──────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SeriesBundlePayload {
    seasons: WireSeasonList,
}

#[derive(Debug, Deserialize)]
struct WireSeasonList {
    #[serde(default)]
    seasons: Vec<WireSeason>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSeason {
    season_id: String,
    season_sequence_number: u32,
    // The content service reports episode counts under a snake_case key,
    // unlike the rest of the document.
    #[serde(rename = "episodes_meta")]
    episodes_meta: Option<WireEpisodesMeta>,
}

#[derive(Debug, Deserialize)]
struct WireEpisodesMeta {
    hits: u32,
}

pub fn parse_series_seasons(body: &str) -> Result<Vec<SeasonSummary>, BamError> {
    let bundle: SeriesBundlePayload = from_payload(body)?;
    Ok(bundle
        .seasons
        .seasons
        .into_iter()
        .map(|s| SeasonSummary {
            season_id: s.season_id,
            season_sequence_number: s.season_sequence_number,
            episode_hits: s.episodes_meta.map(|m| m.hits).unwrap_or(0),
        })
        .collect())
}

// ── Season episodes ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct EpisodesPayload {
    #[serde(default)]
    videos: Vec<WireEpisode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEpisode {
    episode_sequence_number: u32,
    media_metadata: Option<WireMediaMetadata>,
}

pub fn parse_season_episodes(body: &str) -> Result<Vec<EpisodeCandidate>, BamError> {
    let payload: EpisodesPayload = from_payload(body)?;
    Ok(payload
        .videos
        .into_iter()
        .filter_map(|v| {
            let meta = v.media_metadata?;
            Some(EpisodeCandidate {
                episode_sequence_number: v.episode_sequence_number,
                media_id: meta.media_id,
                runtime_millis: meta.runtime_millis,
            })
        })
        .collect())
}

// ── Session context (GraphQL) ────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct SessionData {
    me: WireMe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMe {
    active_session: WireActiveSession,
    account: WireAccount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireActiveSession {
    is_kids_mode_enabled: bool,
    preferred_maturity_rating: WireMaturity,
    location: WireLocation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMaturity {
    implied_maturity_rating: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLocation {
    country_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAccount {
    active_profile: WireProfile,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
    attributes: WireProfileAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProfileAttributes {
    language_preferences: WireLanguagePreferences,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLanguagePreferences {
    app_language: String,
}

/// Parse the combined profile/session query response. Any missing field fails
/// the whole parse: the four context fields travel together or not at all.
pub fn parse_session_context(body: &str) -> Result<SessionContext, BamError> {
    let resp: GraphQlResponse<SessionData> =
        serde_json::from_str(body).map_err(|e| BamError::Parse(e.to_string()))?;
    let me = resp.data.me;
    Ok(SessionContext {
        kids_mode_enabled: me.active_session.is_kids_mode_enabled,
        implied_maturity_rating: me.active_session.preferred_maturity_rating.implied_maturity_rating,
        app_language: me.account.active_profile.attributes.language_preferences.app_language,
        region: me.active_session.location.country_code,
    })
}
