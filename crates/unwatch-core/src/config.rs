use serde::{Deserialize, Serialize};
use unwatch_api::types::{Endpoints, TelemetryDefaults};

use crate::error::RemoverError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Pipeline configuration: endpoint bases, fixed telemetry parameters and the
/// navigation-route allow-list. The system reads no files at runtime; the
/// embedded default document is the single source of defaults, and the
/// embedding layer may hand in an overridden document instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoverConfig {
    pub endpoints: Endpoints,
    pub telemetry: TelemetryDefaults,
    pub routes: RouteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Location prefixes on which the presence machine re-arms after a
    /// client-side navigation.
    pub allowed: Vec<String>,
}

impl RemoverConfig {
    pub fn from_toml(doc: &str) -> Result<Self, RemoverError> {
        toml::from_str(doc).map_err(|e| RemoverError::Config(e.to_string()))
    }
}

impl Default for RemoverConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
