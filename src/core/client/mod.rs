//! Public client surface + builder.
//! Internals are split into `auth` (cookie/crumb) and `constants` (UA + defaults).

mod auth;
mod constants;

use crate::core::FetchError;
use constants::{
    DEFAULT_BASE_CHART, DEFAULT_BASE_QUOTE_SUMMARY, DEFAULT_COOKIE_URL, DEFAULT_CRUMB_URL,
    USER_AGENT,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use url::Url;

#[derive(Debug, Default)]
struct AuthState {
    cookie: Option<String>,
    crumb: Option<String>,
}

/// Shared HTTP session for all Yahoo endpoints.
///
/// Cloning is cheap: the underlying connection pool and the cookie/crumb
/// state are shared between clones, so one client can serve a whole batch of
/// concurrent fetches.
#[derive(Clone, Debug)]
pub struct YahooClient {
    http: Client,
    base_quote_summary: Url,
    base_chart: Url,
    cookie_url: Url,
    crumb_url: Url,

    state: Arc<RwLock<AuthState>>,
    credential_fetch_lock: Arc<Mutex<()>>,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl YahooClient {
    /// Create a new builder.
    pub fn builder() -> YahooClientBuilder {
        YahooClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_quote_summary(&self) -> &Url {
        &self.base_quote_summary
    }
    pub(crate) fn base_chart(&self) -> &Url {
        &self.base_chart
    }

    /// Send a request and surface non-2xx responses as [`FetchError::Status`].
    pub(crate) async fn send_checked(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, FetchError> {
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
                url: resp.url().to_string(),
            });
        }
        Ok(resp)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct YahooClientBuilder {
    user_agent: Option<String>,
    base_quote_summary: Option<Url>,
    base_chart: Option<Url>,
    cookie_url: Option<Url>,
    crumb_url: Option<Url>,

    preauth_cookie: Option<String>,
    preauth_crumb: Option<String>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl YahooClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quoteSummary API base (e.g., `https://query1.finance.yahoo.com/v10/finance/quoteSummary/`).
    #[must_use]
    pub fn base_quote_summary(mut self, url: Url) -> Self {
        self.base_quote_summary = Some(url);
        self
    }

    /// Override the chart API base (e.g., `https://query1.finance.yahoo.com/v8/finance/chart/`).
    #[must_use]
    pub fn base_chart(mut self, url: Url) -> Self {
        self.base_chart = Some(url);
        self
    }

    /// Override the cookie bootstrap URL.
    #[must_use]
    pub fn cookie_url(mut self, url: Url) -> Self {
        self.cookie_url = Some(url);
        self
    }

    /// Override the crumb URL.
    #[must_use]
    pub fn crumb_url(mut self, url: Url) -> Self {
        self.crumb_url = Some(url);
        self
    }

    /// Provide pre-acquired credentials, bypassing the cookie/crumb fetch.
    #[must_use]
    pub fn preauth(mut self, cookie: impl Into<String>, crumb: impl Into<String>) -> Self {
        self.preauth_cookie = Some(cookie.into());
        self.preauth_crumb = Some(crumb.into());
        self
    }

    /// Set a per-request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a default endpoint URL fails to parse or the
    /// underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<YahooClient, FetchError> {
        let base_quote_summary = self
            .base_quote_summary
            .unwrap_or(Url::parse(DEFAULT_BASE_QUOTE_SUMMARY)?);
        let base_chart = self.base_chart.unwrap_or(Url::parse(DEFAULT_BASE_CHART)?);
        let cookie_url = self.cookie_url.unwrap_or(Url::parse(DEFAULT_COOKIE_URL)?);
        let crumb_url = self.crumb_url.unwrap_or(Url::parse(DEFAULT_CRUMB_URL)?);

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(YahooClient {
            http,
            base_quote_summary,
            base_chart,
            cookie_url,
            crumb_url,
            state: Arc::new(RwLock::new(AuthState {
                cookie: self.preauth_cookie,
                crumb: self.preauth_crumb,
            })),
            credential_fetch_lock: Arc::new(Mutex::new(())),
        })
    }
}
