//! WSDOT traveler API HTTP client.
//!
//! Issues authenticated GET requests and classifies HTTP-level failures.
//! Decoding the JSON into domain records is left to the resource clients.

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::error::TransportError;
use super::pool::shared_pool;

/// Default base URL for the WSDOT traffic API.
pub const DEFAULT_BASE_URL: &str = "http://www.wsdot.wa.gov/traffic/api/";

/// Query parameter carrying the access code on every request.
const ACCESS_CODE_PARAM: &str = "AccessCode";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Configuration for a WSDOT client.
#[derive(Debug, Clone)]
pub struct WsdotConfig {
    /// Access code sent with every request
    pub access_code: String,
    /// Base URL for the API (defaults to production WSDOT)
    pub base_url: String,
    /// Connection pool to use instead of the process-wide one
    pub pool: Option<reqwest::Client>,
}

impl WsdotConfig {
    /// Create a new config with the given access code.
    pub fn new(access_code: impl Into<String>) -> Self {
        Self {
            access_code: access_code.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            pool: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a caller-owned connection pool.
    pub fn with_pool(mut self, pool: reqwest::Client) -> Self {
        self.pool = Some(pool);
        self
    }
}

/// Authenticated client for one resource family of the WSDOT API.
///
/// Holds no per-call state, so a single client can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct WsdotClient {
    http: reqwest::Client,
    base_url: String,
    resource_path: String,
    access_code: String,
}

impl WsdotClient {
    /// Create a client for the resource under `resource_path`
    /// (e.g. `"TravelTimes/TravelTimesREST.svc/"`).
    ///
    /// Falls back to the shared pool when the config has none.
    pub fn new(
        config: WsdotConfig,
        resource_path: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let http = match config.pool {
            Some(pool) => pool,
            None => shared_pool()?,
        };

        Ok(Self {
            http,
            base_url: config.base_url,
            resource_path: resource_path.into(),
            access_code: config.access_code,
        })
    }

    /// Full URL for `subpath`, without query parameters.
    pub fn url(&self, subpath: &str) -> String {
        format!("{}{}{}", self.base_url, self.resource_path, subpath)
    }

    /// GET `subpath` with `params` plus the access code, and decode the JSON body.
    ///
    /// The access code always wins over a caller parameter with the same name.
    /// The response must be a 200 with a non-empty body and an
    /// `application/json` content type, checked in that order.
    pub async fn get_json(
        &self,
        subpath: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, TransportError> {
        let url = self.url(subpath);
        let query = merge_params(params, &self.access_code);
        trace!(
            keys = ?query.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            "query parameters"
        );
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| TransportError::new("request failed", &url, None).with_source(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "unexpected status");
            return Err(TransportError::new(
                "unexpected status",
                url,
                Some(status.as_u16()),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| media_type(v).to_string())
            .unwrap_or_default();

        // An empty body is reported as such whatever its declared type.
        let body = response.text().await.map_err(|e| {
            TransportError::new("failed to read body", &url, Some(status.as_u16())).with_source(e)
        })?;
        if body.is_empty() {
            warn!(%url, "received no data");
            return Err(TransportError::new("received no data", url, None));
        }

        if !content_type.eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
            warn!(%url, %content_type, "unexpected data type");
            return Err(TransportError::new(
                "unexpected data type",
                url,
                Some(status.as_u16()),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, error = %e, "malformed JSON body");
            TransportError::new("malformed JSON body", url, Some(status.as_u16()))
        })
    }
}

impl fmt::Debug for WsdotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WsdotClient")
            .field("base_url", &self.base_url)
            .field("resource_path", &self.resource_path)
            .finish_non_exhaustive()
    }
}

/// Caller parameters first, then the access code; any caller-supplied
/// access code is dropped.
fn merge_params<'a>(
    params: &[(&'a str, &'a str)],
    access_code: &'a str,
) -> Vec<(&'a str, &'a str)> {
    params
        .iter()
        .filter(|(key, _)| *key != ACCESS_CODE_PARAM)
        .copied()
        .chain(std::iter::once((ACCESS_CODE_PARAM, access_code)))
        .collect()
}

/// Media type of a Content-Type value, parameters dropped
/// ("application/json; charset=utf-8" -> "application/json").
fn media_type(header: &str) -> &str {
    header.split(';').next().unwrap_or_default().trim()
}
