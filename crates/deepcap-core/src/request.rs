//! Request URL building.
//!
//! Call sites write request URLs against pseudo-schemes (`server://`,
//! `serverless://`, `web://`) and this module expands them against the
//! effective endpoints, so switching environments never requires touching a
//! call site. Absolute http(s) URLs pass through unchanged.

use thiserror::Error;
use url::Url;

use crate::endpoints::EffectiveEndpoints;

/// `server://<path>` expands to `{apiUrl}/api/v1/<path>`.
pub const SERVER_SCHEME: &str = "server";
/// `serverless://<path>` expands to `{serverlessUrl}/<path>`.
pub const SERVERLESS_SCHEME: &str = "serverless";
/// `web://<path>` expands to `{webUrl}/<path>`.
pub const WEB_SCHEME: &str = "web";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestUrlError {
    #[error("request URL {0:?} is not absolute")]
    NotAbsolute(String),
    #[error("request URL scheme {0:?} is not recognized")]
    UnknownScheme(String),
    #[error("expanded request URL {0:?} is invalid")]
    Invalid(String, #[source] url::ParseError),
}

/// Expand a pseudo-scheme request URL against the effective endpoints.
pub fn expand_request_url(
    raw: &str,
    endpoints: &EffectiveEndpoints,
) -> Result<Url, RequestUrlError> {
    let (scheme, rest) = raw
        .split_once("://")
        .ok_or_else(|| RequestUrlError::NotAbsolute(raw.to_string()))?;

    let expanded = match scheme {
        "http" | "https" => raw.to_string(),
        SERVER_SCHEME => join(&api_v1_base(endpoints), rest),
        SERVERLESS_SCHEME => join(endpoints.serverless_url.as_str(), rest),
        WEB_SCHEME => join(endpoints.web_url.as_str(), rest),
        other => return Err(RequestUrlError::UnknownScheme(other.to_string())),
    };

    Url::parse(&expanded).map_err(|source| RequestUrlError::Invalid(expanded, source))
}

/// REST base: `{apiUrl}/api/v1`.
pub fn api_v1_base(endpoints: &EffectiveEndpoints) -> String {
    format!("{}/api/v1", trimmed(endpoints.api_url.as_str()))
}

/// Admin panel: `{apiUrl}/admin/`.
pub fn admin_endpoint(endpoints: &EffectiveEndpoints) -> Result<Url, RequestUrlError> {
    let expanded = format!("{}/admin/", trimmed(endpoints.api_url.as_str()));
    Url::parse(&expanded).map_err(|source| RequestUrlError::Invalid(expanded, source))
}

/// GraphQL endpoint: `{apiUrl}/graphql/`.
pub fn graphql_endpoint(endpoints: &EffectiveEndpoints) -> Result<Url, RequestUrlError> {
    let expanded = format!("{}/graphql/", trimmed(endpoints.api_url.as_str()));
    Url::parse(&expanded).map_err(|source| RequestUrlError::Invalid(expanded, source))
}

/// Name of the session CSRF cookie for the given configuration identifier.
pub fn csrf_cookie_name(identifier: &str) -> String {
    format!("deep-{identifier}-csrftoken")
}

fn join(base: &str, rest: &str) -> String {
    format!("{}/{}", trimmed(base), rest.trim_start_matches('/'))
}

fn trimmed(base: &str) -> &str {
    base.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints;

    #[test]
    fn test_server_scheme_expands_to_api_v1() {
        let url =
            expand_request_url("server://v2/web-info-data/", &endpoints::production()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://prod-api.thedeep.io/api/v1/v2/web-info-data/"
        );
    }

    #[test]
    fn test_serverless_scheme_expands_against_serverless_base() {
        let url =
            expand_request_url("serverless://web-info-extract/", &endpoints::staging()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://services-alpha.thedeep.io/web-info-extract/"
        );
    }

    #[test]
    fn test_web_scheme_expands_against_web_base() {
        let url = expand_request_url("web://permalink/1", &endpoints::production()).unwrap();
        assert_eq!(url.as_str(), "https://app.thedeep.io/permalink/1");
    }

    #[test]
    fn test_absolute_http_urls_pass_through() {
        let url = expand_request_url("https://example.org/page", &endpoints::production()).unwrap();
        assert_eq!(url.as_str(), "https://example.org/page");
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let err = expand_request_url("ftp://example.org", &endpoints::production()).unwrap_err();
        assert_eq!(err, RequestUrlError::UnknownScheme("ftp".to_string()));
    }

    #[test]
    fn test_relative_urls_are_rejected() {
        let err = expand_request_url("v2/web-info-data/", &endpoints::production()).unwrap_err();
        assert!(matches!(err, RequestUrlError::NotAbsolute(_)));
    }

    #[test]
    fn test_admin_and_graphql_endpoints() {
        let production = endpoints::production();
        assert_eq!(
            admin_endpoint(&production).unwrap().as_str(),
            "https://prod-api.thedeep.io/admin/"
        );
        assert_eq!(
            graphql_endpoint(&production).unwrap().as_str(),
            "https://prod-api.thedeep.io/graphql/"
        );
    }

    #[test]
    fn test_csrf_cookie_name_embeds_identifier() {
        assert_eq!(csrf_cookie_name("prod"), "deep-prod-csrftoken");
        assert_eq!(csrf_cookie_name("staging"), "deep-staging-csrftoken");
    }
}
