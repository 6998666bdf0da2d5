use reqwest::Client;
use url::Url;

use super::error::BamError;
use super::{telemetry, types};
use crate::traits::ContentService;
use crate::types::{
    ContainerSummary, Endpoints, EpisodeCandidate, ProgressSample, SeasonSummary, SessionContext,
    TelemetryDefaults, WatchHistoryEntry,
};

const SESSION_QUERY: &str = r#"
query {
    me {
        activeSession {
            isKidsModeEnabled
            preferredMaturityRating { impliedMaturityRating }
            location { countryCode }
        }
        account {
            activeProfile {
                attributes {
                    languagePreferences { appLanguage }
                }
            }
        }
    }
}
"#;

/// Client for the host's BAM backend: the GraphQL session/telemetry service
/// and the REST content service.
///
/// The client holds no credential. The bearer value is captured from the
/// host's own traffic and passed into every call verbatim, scheme included,
/// exactly as it was observed on the wire.
pub struct BamClient {
    http: Client,
    endpoints: Endpoints,
    telemetry: TelemetryDefaults,
}

impl BamClient {
    pub fn new(endpoints: Endpoints, telemetry: TelemetryDefaults) -> Result<Self, BamError> {
        for base in [&endpoints.session_base, &endpoints.content_base] {
            Url::parse(base).map_err(|e| BamError::Config(format!("bad base url {base}: {e}")))?;
        }
        Ok(Self {
            http: Client::new(),
            endpoints,
            telemetry,
        })
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BamError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(BamError::Api {
                status,
                message: body,
            })
        }
    }

    /// Content-service URL, scoped by the session context. Every content query
    /// carries region, audience, maturity and language path segments; getting
    /// these wrong yields a mismatched catalog rather than an error.
    fn content_url(&self, ctx: &SessionContext, resource: &str, suffix: &str) -> String {
        let base = &self.endpoints.content_base;
        let version = &self.endpoints.api_version;
        let audience = if ctx.kids_mode_enabled {
            "k-true,l-true"
        } else {
            "k-false,l-true"
        };
        format!(
            "{base}/svc/content/{resource}/version/{version}/region/{region}/audience/{audience}/maturity/{maturity}/language/{language}/{suffix}",
            region = ctx.region,
            maturity = ctx.implied_maturity_rating,
            language = ctx.app_language,
        )
    }

    async fn get_content(&self, token: &str, url: &str) -> Result<String, BamError> {
        tracing::debug!(url, "content request");
        let resp = self
            .http
            .get(url)
            .header("Authorization", token)
            .header("Accept", "application/json")
            .send()
            .await?;
        let resp = Self::check_response(resp).await?;
        Ok(resp.text().await?)
    }
}

impl ContentService for BamClient {
    type Error = BamError;

    async fn fetch_session_context(&self, token: &str) -> Result<SessionContext, BamError> {
        tracing::debug!("session context request");
        let url = format!("{}/v1/public/graphql", self.endpoints.session_base);
        let resp = self
            .http
            .post(url)
            .header("Authorization", token)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "query": SESSION_QUERY }))
            .send()
            .await?;
        let resp = Self::check_response(resp).await?;
        types::parse_session_context(&resp.text().await?)
    }

    async fn fetch_home_collection(
        &self,
        token: &str,
        ctx: &SessionContext,
    ) -> Result<Vec<ContainerSummary>, BamError> {
        let url = self.content_url(
            ctx,
            "Collection/PersonalizedCollection",
            "contentClass/home/slug/home",
        );
        types::parse_collection_containers(&self.get_content(token, &url).await?)
    }

    async fn fetch_set_items(
        &self,
        token: &str,
        ctx: &SessionContext,
        set_id: &str,
    ) -> Result<Vec<WatchHistoryEntry>, BamError> {
        let url = self.content_url(ctx, "SetBySetId", &format!("setId/{set_id}/pageSize/60/page/1"));
        types::parse_set_items(&self.get_content(token, &url).await?)
    }

    async fn fetch_series_seasons(
        &self,
        token: &str,
        ctx: &SessionContext,
        series_id: &str,
    ) -> Result<Vec<SeasonSummary>, BamError> {
        let url = self.content_url(
            ctx,
            "DmcSeriesBundle",
            &format!("encodedSeriesId/{series_id}/pageSize/30/page/1"),
        );
        types::parse_series_seasons(&self.get_content(token, &url).await?)
    }

    async fn fetch_season_episodes(
        &self,
        token: &str,
        ctx: &SessionContext,
        season_id: &str,
    ) -> Result<Vec<EpisodeCandidate>, BamError> {
        let url = self.content_url(
            ctx,
            "DmcEpisodes",
            &format!("seasonId/{season_id}/pageSize/60/page/1"),
        );
        types::parse_season_episodes(&self.get_content(token, &url).await?)
    }

    async fn submit_progress(&self, token: &str, sample: &ProgressSample) -> Result<(), BamError> {
        tracing::debug!(media_id = %sample.media_id, play_head = sample.play_head_seconds, "telemetry submission");
        let url = format!("{}/telemetry", self.endpoints.session_base);
        let batch = telemetry::progress_batch(sample, &self.telemetry);
        let resp = self
            .http
            .post(url)
            .header("Authorization", token)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&batch)
            .send()
            .await?;
        Self::check_response(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_url_carries_session_parameters() {
        let client = BamClient::new(Endpoints::default(), TelemetryDefaults::default()).unwrap();
        let ctx = SessionContext {
            kids_mode_enabled: false,
            implied_maturity_rating: 7,
            app_language: "en".into(),
            region: "US".into(),
        };

        let url = client.content_url(&ctx, "SetBySetId", "setId/S1/pageSize/60/page/1");
        assert_eq!(
            url,
            "https://disney.content.edge.bamgrid.com/svc/content/SetBySetId/version/5.1\
             /region/US/audience/k-false,l-true/maturity/7/language/en\
             /setId/S1/pageSize/60/page/1"
        );
    }

    #[test]
    fn test_content_url_kids_audience() {
        let client = BamClient::new(Endpoints::default(), TelemetryDefaults::default()).unwrap();
        let ctx = SessionContext {
            kids_mode_enabled: true,
            ..SessionContext::default()
        };
        let url = client.content_url(&ctx, "DmcEpisodes", "seasonId/s2/pageSize/60/page/1");
        assert!(url.contains("/audience/k-true,l-true/"));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let endpoints = Endpoints {
            session_base: "not a url".into(),
            ..Endpoints::default()
        };
        assert!(matches!(
            BamClient::new(endpoints, TelemetryDefaults::default()),
            Err(BamError::Config(_))
        ));
    }
}
