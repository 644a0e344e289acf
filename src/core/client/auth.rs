//! Cookie & crumb acquisition for Yahoo endpoints.

use crate::core::error::FetchError;
use reqwest::header::SET_COOKIE;

impl super::YahooClient {
    /// Make sure a cookie and crumb are available before an authenticated call.
    pub(crate) async fn ensure_credentials(&self) -> Result<(), FetchError> {
        // Fast path: credentials already present.
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        // Only one task performs the acquisition; the rest wait here.
        let _guard = self.credential_fetch_lock.lock().await;

        // Another task may have finished the fetch while this one waited.
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        self.fetch_cookie().await?;
        self.fetch_crumb().await?;

        Ok(())
    }

    pub(crate) async fn clear_crumb(&self) {
        self.state.write().await.crumb = None;
    }

    pub(crate) async fn crumb(&self) -> Option<String> {
        self.state.read().await.crumb.clone()
    }

    async fn fetch_cookie(&self) -> Result<(), FetchError> {
        // The consent endpoint may answer with any status; only the cookie matters.
        let resp = self.http.get(self.cookie_url.clone()).send().await?;

        let cookie = resp
            .headers()
            .get(SET_COOKIE)
            .ok_or_else(|| FetchError::Auth("no cookie received from consent endpoint".into()))?
            .to_str()
            .map_err(|_| FetchError::Auth("invalid cookie header format".into()))?
            .to_string();

        self.state.write().await.cookie = Some(cookie);
        Ok(())
    }

    async fn fetch_crumb(&self) -> Result<(), FetchError> {
        if self.state.read().await.cookie.is_none() {
            return Err(FetchError::Auth("cookie is missing, cannot get crumb".into()));
        }

        let resp = self.http.get(self.crumb_url.clone()).send().await?;
        let crumb = resp.text().await?;

        // A failed crumb fetch comes back as an HTML or JSON error page.
        if crumb.is_empty() || crumb.contains('{') || crumb.contains('<') {
            return Err(FetchError::Auth(format!("received invalid crumb: {crumb}")));
        }

        self.state.write().await.crumb = Some(crumb);
        Ok(())
    }
}
