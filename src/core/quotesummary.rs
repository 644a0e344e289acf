use crate::core::{FetchError, YahooClient};
use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct V10Envelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: Option<V10QuoteSummary>,
}

#[derive(Deserialize)]
pub(crate) struct V10QuoteSummary {
    pub(crate) result: Option<Vec<serde_json::Value>>,
    pub(crate) error: Option<V10Error>,
}

#[derive(Deserialize)]
pub(crate) struct V10Error {
    pub(crate) description: String,
}

/// Fetch the first quoteSummary result object for `symbol`.
///
/// Yahoo invalidates crumbs at will; an `Invalid Crumb` envelope clears the
/// cached crumb and the call is re-attempted once with fresh credentials.
pub(crate) async fn fetch_result(
    client: &YahooClient,
    symbol: &str,
    modules: &str,
) -> Result<serde_json::Value, FetchError> {
    for attempt in 0..=1 {
        let env = attempt_fetch(client, symbol, modules).await?;

        if let Some(error) = env.quote_summary.as_ref().and_then(|qs| qs.error.as_ref()) {
            let desc = error.description.to_ascii_lowercase();
            if desc.contains("invalid crumb") && attempt == 0 {
                client.clear_crumb().await;
                continue;
            }
            return Err(FetchError::Data(format!(
                "yahoo error: {}",
                error.description
            )));
        }

        return env
            .quote_summary
            .and_then(|qs| qs.result)
            .and_then(|mut v| v.pop())
            .ok_or_else(|| FetchError::Data("empty quoteSummary result".into()));
    }

    Err(FetchError::Data(
        "quoteSummary call failed after crumb refresh".into(),
    ))
}

async fn attempt_fetch(
    client: &YahooClient,
    symbol: &str,
    modules: &str,
) -> Result<V10Envelope, FetchError> {
    client.ensure_credentials().await?;

    let crumb = client
        .crumb()
        .await
        .ok_or_else(|| FetchError::Data("crumb is not set".into()))?;

    let mut url = client.base_quote_summary().join(symbol)?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("modules", modules);
        qp.append_pair("crumb", &crumb);
    }

    let resp = client.send_checked(client.http().get(url)).await?;
    let text = resp.text().await?;

    serde_json::from_str(&text)
        .map_err(|e| FetchError::Data(format!("quoteSummary json parse: {e}")))
}
