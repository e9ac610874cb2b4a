//! HTTP client for the Zoom Phone API
//!
//! Implements the three calls the engine depends on: the server-to-server
//! OAuth token grant, the paginated account call-history listing, and the
//! per-record call path detail lookup.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::future::Future;

use crate::config::ZoomConfig;
use crate::engine::CallPathSource;
use crate::error::{Error, Result};
use crate::types::{CallPathDetail, CallRecord};

/// Default OAuth base URL
pub const DEFAULT_OAUTH_URL: &str = "https://zoom.us/oauth";
/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.zoom.us/v2";

/// Records per call-history page (the API maximum)
const PAGE_SIZE: u32 = 300;

/// Scopes that grant call log access; any one of them suffices.
pub const CALL_LOG_SCOPES: [&str; 3] = [
    "phone:read:admin",
    "phone_call_log:read:admin",
    "phone:read:list_call_logs:admin",
];

/// Response from POST {oauth}/token
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    scope: String,
}

/// One page of GET /phone/call_history
#[derive(Debug, Deserialize)]
struct CallHistoryPage {
    #[serde(default)]
    call_logs: Vec<CallRecord>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug)]
struct OAuthSession {
    access_token: String,
    scope: String,
}

/// HTTP client for the Zoom Phone API
pub struct ZoomClient {
    http_client: reqwest::Client,
    oauth_url: String,
    api_url: String,
    account_id: String,
    client_id: String,
    client_secret: String,
    session: Option<OAuthSession>,
}

impl ZoomClient {
    /// Create a new client from configuration
    ///
    /// Returns an error if the configuration is missing credentials.
    pub fn new(config: &ZoomConfig) -> Result<Self> {
        config.validate()?;

        let oauth_url = config
            .oauth_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OAUTH_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let api_url = config
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            oauth_url,
            api_url,
            account_id: config.account_id.clone().unwrap_or_default(),
            client_id: config.client_id.clone().unwrap_or_default(),
            client_secret: config.client_secret.clone().unwrap_or_default(),
            session: None,
        })
    }

    /// Acquire an access token via the account-credentials grant.
    ///
    /// Must be called before any API method.
    pub async fn authenticate(&mut self) -> Result<()> {
        let url = format!("{}/token", self.oauth_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.account_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Auth(format!(
                "token request rejected ({}): {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Auth(format!("failed to parse token response: {}", e)))?;

        tracing::info!("access token acquired");
        self.session = Some(OAuthSession {
            access_token: token.access_token,
            scope: token.scope,
        });

        Ok(())
    }

    /// Whether the granted scopes include call log access
    pub fn has_call_log_scope(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| scope_grants_call_log_access(&s.scope))
            .unwrap_or(false)
    }

    fn access_token(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .ok_or_else(|| Error::Auth("client is not authenticated".to_string()))
    }

    /// Fetch the account call history for a date range.
    ///
    /// Follows `next_page_token` until the listing is exhausted and
    /// returns the concatenated records in page order.
    pub async fn call_history(
        &self,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<Vec<CallRecord>> {
        let token = self.access_token()?.to_string();
        let url = format!("{}/phone/call_history", self.api_url);

        let mut history = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .http_client
                .get(&url)
                .bearer_auth(&token)
                .query(&[
                    ("page_size", PAGE_SIZE.to_string()),
                    ("from", from.to_string()),
                    ("to", to.to_string()),
                ]);
            if let Some(t) = &page_token {
                request = request.query(&[("next_page_token", t.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| Error::Api(format!("call history request failed: {}", e)))?;

            let status = response.status();

            if !status.is_success() {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown".to_string());
                return Err(Error::Api(format!(
                    "call history request rejected ({}): {}",
                    status, error_text
                )));
            }

            let page: CallHistoryPage = response
                .json()
                .await
                .map_err(|e| Error::Api(format!("failed to parse call history page: {}", e)))?;

            pages += 1;
            history.extend(page.call_logs);

            match page.next_page_token {
                Some(t) if !t.is_empty() => page_token = Some(t),
                _ => break,
            }
        }

        tracing::info!(records = history.len(), pages, "call history fetched");
        Ok(history)
    }

    /// Fetch the call path detail for one call record.
    pub async fn fetch_call_path(&self, record_id: &str) -> Result<CallPathDetail> {
        let token = self.access_token()?;
        let url = format!(
            "{}/phone/call_history/{}",
            self.api_url,
            urlencoding::encode(record_id)
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::Api(format!("call path request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Api(format!(
                "call path request rejected ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Api(format!("failed to parse call path: {}", e)))
    }
}

impl CallPathSource for ZoomClient {
    fn call_path(&self, record_id: &str) -> impl Future<Output = Result<CallPathDetail>> + Send {
        self.fetch_call_path(record_id)
    }
}

/// Check whether a granted scope string covers call log access.
///
/// Zoom reports granted scopes as a single delimited string; membership
/// is checked per scope name.
fn scope_grants_call_log_access(scope: &str) -> bool {
    CALL_LOG_SCOPES
        .iter()
        .any(|wanted| scope.split([' ', ',']).any(|granted| granted == *wanted))
}
