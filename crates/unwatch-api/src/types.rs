use serde::{Deserialize, Serialize};

/// Viewer profile and session attributes that parameterize every content call.
///
/// All four fields travel together: the resolver either parses the whole set
/// or leaves the defaults in place. Partial updates are not representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub kids_mode_enabled: bool,
    pub implied_maturity_rating: u32,
    pub app_language: String,
    pub region: String,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            kids_mode_enabled: false,
            implied_maturity_rating: 0,
            app_language: "en".into(),
            region: "GB".into(),
        }
    }
}

/// One container inside the viewer's personalized home collection.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    pub style: String,
    pub set_ref: Option<String>,
}

/// A resolved continue-watching entry.
#[derive(Debug, Clone)]
pub struct WatchHistoryEntry {
    pub entry_id: String,
    pub media_id: String,
    pub elapsed_runtime_millis: u64,
    /// Present when the entry is an episode of a series; removal then goes
    /// through the latest-aired-episode resolution instead.
    pub series_id: Option<String>,
}

impl WatchHistoryEntry {
    pub fn is_series(&self) -> bool {
        self.series_id.is_some()
    }
}

/// One season of a series, as listed by the series bundle query.
#[derive(Debug, Clone)]
pub struct SeasonSummary {
    pub season_id: String,
    pub season_sequence_number: u32,
    pub episode_hits: u32,
}

/// One episode within a season, candidate for the "latest aired" selection.
#[derive(Debug, Clone)]
pub struct EpisodeCandidate {
    pub episode_sequence_number: u32,
    pub media_id: String,
    pub runtime_millis: u64,
}

/// A single playback-progress report, as the orchestrator hands it to the
/// backend client. The client fills in the fixed telemetry fields and the
/// send-time timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSample {
    pub media_id: String,
    pub play_head_seconds: f64,
}

/// Base URLs and version segment for the two backend services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub session_base: String,
    pub content_base: String,
    pub api_version: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            session_base: "https://disney.api.edge.bamgrid.com".into(),
            content_base: "https://disney.content.edge.bamgrid.com".into(),
            api_version: "5.1".into(),
        }
    }
}

/// Fixed telemetry parameters.
///
/// `priming_play_head_millis` is the artificially small play head used by the
/// first of the two series submissions. The backend appears to require a play
/// session to exist before a completion-sized report is honored; the value
/// itself is empirically chosen and kept opaque and configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryDefaults {
    pub priming_play_head_millis: u64,
    pub bitrate: u32,
    pub event: String,
}

impl Default for TelemetryDefaults {
    fn default() -> Self {
        Self {
            priming_play_head_millis: 5000,
            bitrate: 50,
            event: "urn:dss:telemetry-service:event:stream-sample".into(),
        }
    }
}
