//! The synthetic playback-progress payload.
//!
//! The backend treats a stream sample whose play head reaches the runtime as a
//! finished watch and drops the title from the continue-watching set. Reports
//! are submitted as a single-element batch; the fields the service does not
//! verify are pinned to the literal `"unknown"`.

use chrono::Utc;
use serde::Serialize;

use crate::types::{ProgressSample, TelemetryDefaults};

#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub server: ServerFields,
    pub client: ClientFields,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerFields {
    pub fguid: String,
    #[serde(rename = "mediaId")]
    pub media_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientFields {
    pub event: String,
    pub timestamp: i64,
    pub play_head: f64,
    pub playback_session_id: String,
    pub bitrate: u32,
    pub interaction_id: String,
}

/// Build the one-element batch for a progress sample, timestamped now.
pub fn progress_batch(sample: &ProgressSample, defaults: &TelemetryDefaults) -> Vec<ProgressEvent> {
    vec![ProgressEvent {
        server: ServerFields {
            fguid: "unknown".into(),
            media_id: sample.media_id.clone(),
        },
        client: ClientFields {
            event: defaults.event.clone(),
            timestamp: Utc::now().timestamp_millis(),
            play_head: sample.play_head_seconds,
            playback_session_id: "unknown".into(),
            bitrate: defaults.bitrate,
            interaction_id: "unknown".into(),
        },
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_shape_and_field_names() {
        let sample = ProgressSample {
            media_id: "M1".into(),
            play_head_seconds: 120.0,
        };
        let batch = progress_batch(&sample, &TelemetryDefaults::default());
        let json = serde_json::to_value(&batch).unwrap();

        let events = json.as_array().unwrap();
        assert_eq!(events.len(), 1);

        let server = &events[0]["server"];
        assert_eq!(server["fguid"], "unknown");
        assert_eq!(server["mediaId"], "M1");

        let client = &events[0]["client"];
        assert_eq!(client["event"], "urn:dss:telemetry-service:event:stream-sample");
        assert_eq!(client["play_head"], 120.0);
        assert_eq!(client["playback_session_id"], "unknown");
        assert_eq!(client["bitrate"], 50);
        assert_eq!(client["interaction_id"], "unknown");
        assert!(client["timestamp"].as_i64().unwrap() > 0);
    }
}
