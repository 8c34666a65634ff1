//! HTTP client for the metadata extraction services.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::endpoints::EffectiveEndpoints;
use crate::request::expand_request_url;

use super::models::{RawWebInfo, WebInfo};

/// Serverless extractor, returns raw page metadata.
const WEB_INFO_EXTRACT_URL: &str = "serverless://web-info-extract/";
/// API server resolver, turns raw publisher/author names into organizations.
const WEB_INFO_DATA_URL: &str = "server://v2/web-info-data/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the two-step metadata extraction chain.
pub struct WebInfoClient {
    http: Client,
    endpoints: EffectiveEndpoints,
}

impl WebInfoClient {
    pub fn new(endpoints: EffectiveEndpoints) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to initialize HTTP client")?;

        Ok(Self { http, endpoints })
    }

    /// Extract raw metadata for a page from the serverless extractor.
    pub async fn extract_raw(&self, page_url: &str, token: &str) -> Result<RawWebInfo> {
        let mut url = expand_request_url(WEB_INFO_EXTRACT_URL, &self.endpoints)?;
        url.query_pairs_mut().append_pair("url", page_url);

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .context("Web info extract request failed")?;

        response
            .error_for_status()
            .context("Web info extract request was rejected")?
            .json()
            .await
            .context("Web info extract response was not decodable")
    }

    /// Resolve raw publisher/author names into organization records.
    ///
    /// The resolver echoes back the fields it recognized; anything it stays
    /// silent on is carried over from the raw extraction so the caller sees
    /// one merged record.
    pub async fn resolve_organizations(
        &self,
        raw: &RawWebInfo,
        token: &str,
    ) -> Result<WebInfo> {
        let url = expand_request_url(WEB_INFO_DATA_URL, &self.endpoints)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(raw)
            .send()
            .await
            .context("Web info data request failed")?;

        let mut info: WebInfo = response
            .error_for_status()
            .context("Web info data request was rejected")?
            .json()
            .await
            .context("Web info data response was not decodable")?;

        if info.title.is_none() {
            info.title = raw.title.clone();
        }
        if info.date.is_none() {
            info.date = raw.date.clone();
        }
        if info.website.is_none() {
            info.website = raw.website.clone();
        }
        if info.url.is_none() {
            info.url = raw.url.clone();
        }

        Ok(info)
    }

    /// Run the full extraction chain for a page.
    pub async fn capture(&self, page_url: &str, token: &str) -> Result<WebInfo> {
        let raw = self.extract_raw(page_url, token).await?;
        self.resolve_organizations(&raw, token).await
    }
}
