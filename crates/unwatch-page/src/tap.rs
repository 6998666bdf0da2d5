//! Traffic-tap helpers.
//!
//! The injection runtime observes every request the host issues and forwards
//! header and response events into the pipeline. These helpers do the
//! classification. They run inside a code path shared with the host's own
//! networking, so they must never panic.

use url::Url;

/// Path fragment of the host's own continue-watching responses, used for the
/// response-snoop optimization.
const WATCH_HISTORY_PATH: &str = "svc/content/ContinueWatching";

/// Pick the `Authorization` value out of a request's headers.
///
/// Header-name matching is case-insensitive. An absent or empty value yields
/// `None`, which callers treat as "nothing observed".
pub fn authorization_header<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Whether a response URL is the host's own watch-history fetch.
pub fn is_watch_history_response(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().contains(WATCH_HISTORY_PATH),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_case_insensitive() {
        let headers = [("Content-Type", "application/json"), ("AUTHORIZATION", "Bearer abc")];
        assert_eq!(authorization_header(headers), Some("Bearer abc"));
    }

    #[test]
    fn test_authorization_header_absent() {
        let headers = [("Accept", "application/json")];
        assert_eq!(authorization_header(headers), None);
    }

    #[test]
    fn test_authorization_header_empty_value_is_none() {
        let headers = [("authorization", "")];
        assert_eq!(authorization_header(headers), None);
    }

    #[test]
    fn test_watch_history_url_recognized() {
        assert!(is_watch_history_response(
            "https://disney.content.edge.bamgrid.com/svc/content/ContinueWatching/Set/version/5.1/region/US"
        ));
        assert!(!is_watch_history_response(
            "https://disney.content.edge.bamgrid.com/svc/content/DmcEpisodes/version/5.1"
        ));
    }

    #[test]
    fn test_watch_history_url_malformed_is_false() {
        assert!(!is_watch_history_response("not a url"));
    }
}
