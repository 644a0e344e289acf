//! Recent dividend history.
//!
//! The chart v8 endpoint reports dividends as an `events` side channel of the
//! price series; only the events are read here.

mod wire;

use crate::core::{FetchError, YahooClient};
use chrono::DateTime;
use serde_json::{Map, Value};

/// Fetches the `count` most recent dividend payments for `symbol`.
///
/// Returns a map from UTC `YYYY-MM-DD` payment date to amount, in
/// chronological order. If the history holds fewer than `count` payments,
/// all of them are returned.
///
/// # Errors
///
/// Returns an error if the request fails, the response cannot be decoded, or
/// the provider reports an error for the symbol.
pub async fn fetch_last_dividends(
    client: &YahooClient,
    symbol: &str,
    count: usize,
) -> Result<Map<String, Value>, FetchError> {
    let mut url = client.base_chart().join(symbol)?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("range", "max");
        qp.append_pair("interval", "1d");
        qp.append_pair("events", "div");
    }

    let resp = client.send_checked(client.http().get(url)).await?;
    let body = resp.text().await?;
    let parsed: wire::ChartEnvelope =
        serde_json::from_str(&body).map_err(|e| FetchError::Data(format!("chart json parse: {e}")))?;

    let chart = parsed
        .chart
        .ok_or_else(|| FetchError::Data("missing chart".into()))?;

    if let Some(err) = chart.error {
        return Err(FetchError::Data(format!(
            "yahoo error: {} - {}",
            err.code, err.description
        )));
    }

    let r0 = chart
        .result
        .and_then(|mut v| v.pop())
        .ok_or_else(|| FetchError::Data("empty chart result".into()))?;

    let mut payments: Vec<(i64, f64)> = r0
        .events
        .unwrap_or_default()
        .dividends
        .unwrap_or_default()
        .into_values()
        .filter_map(|ev| Some((ev.date?, ev.amount?)))
        .collect();
    payments.sort_unstable_by_key(|&(ts, _)| ts);

    let skip = payments.len().saturating_sub(count);
    let mut out = Map::new();
    for (ts, amount) in payments.into_iter().skip(skip) {
        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| FetchError::Data(format!("dividend timestamp {ts} out of range")))?
            .format("%Y-%m-%d")
            .to_string();
        out.insert(date, Value::from(amount));
    }

    Ok(out)
}
